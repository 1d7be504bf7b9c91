use clap::Parser;
use log::info;
use universalis_market::{sort_sales_by_day, HistoryView, UniversalisClient};

/// Prints an item's recent sales grouped by day
#[derive(Parser, Debug)]
struct Args {
    /// World or data center to look at
    #[arg(short, long)]
    world: String,
    /// Item ID
    #[arg(short, long)]
    item: i32,
    /// Maximum number of days to print
    #[arg(short, long, default_value_t = 7)]
    days: usize,
}

#[tokio::main]
async fn main() -> Result<(), universalis_market::Error> {
    pretty_env_logger::init();
    let args = Args::parse();
    let client = UniversalisClient::new("universalis-market-examples")?;
    let Some(HistoryView::SingleView(history)) = client.get_sales(&args.world, args.item).await?
    else {
        info!("{} is not a known world or data center", args.world);
        return Ok(());
    };
    for (date, sales) in sort_sales_by_day(&history, args.days) {
        println!("{date}");
        for sale in sales {
            println!(
                "  {:>8} {} x{} @ {}{}",
                sale.time.pretty,
                sale.world_name.map(|w| w.to_string()).unwrap_or_default(),
                sale.quantity,
                sale.price_per_unit,
                if sale.hq { " (HQ)" } else { "" }
            );
        }
    }
    Ok(())
}
