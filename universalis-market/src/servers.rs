use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Data centers and the worlds that belong to them, in the order the directory lists them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ServerDirectory(pub IndexMap<String, Vec<String>>);

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ServerKind {
    DataCenter,
    World,
}

impl ServerKind {
    pub fn is_data_center(&self) -> bool {
        matches!(self, ServerKind::DataCenter)
    }

    pub fn is_world(&self) -> bool {
        matches!(self, ServerKind::World)
    }
}

impl ServerDirectory {
    /// Looks a name up as a data center first, then as a world of any data center.
    pub fn classify(&self, name: &str) -> Option<ServerKind> {
        if name.is_empty() {
            return None;
        }
        if self.0.contains_key(name) {
            return Some(ServerKind::DataCenter);
        }
        self.0
            .values()
            .any(|worlds| worlds.iter().any(|world| world == name))
            .then_some(ServerKind::World)
    }

    pub fn data_centers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn worlds(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }
}

#[cfg(test)]
mod test {
    use super::{ServerDirectory, ServerKind};
    use serde_json::json;

    fn directory() -> ServerDirectory {
        serde_json::from_value(json!({
            "Aether": ["Adamantoise", "Cactuar", "Gilgamesh"],
            "Crystal": ["Balmung", "Zalera"],
        }))
        .unwrap()
    }

    #[test]
    fn classify_data_center() {
        let kind = directory().classify("Aether").unwrap();
        assert!(kind.is_data_center());
        assert!(!kind.is_world());
    }

    #[test]
    fn classify_world() {
        assert_eq!(directory().classify("Zalera"), Some(ServerKind::World));
        assert!(directory().classify("Gilgamesh").unwrap().is_world());
    }

    #[test]
    fn classify_unknown() {
        assert_eq!(directory().classify("Moogle"), None);
        assert_eq!(directory().classify(""), None);
        // lookups are exact
        assert_eq!(directory().classify("aether"), None);
    }

    #[test]
    fn directory_keeps_order() {
        let directory: ServerDirectory = serde_json::from_str(
            r#"{
                "Primal": ["Ultros", "Behemoth"],
                "Aether": ["Siren", "Adamantoise"],
                "Light": ["Zodiark", "Alpha"]
            }"#,
        )
        .unwrap();
        assert_eq!(
            directory.data_centers().collect::<Vec<_>>(),
            vec!["Primal", "Aether", "Light"]
        );
        assert_eq!(
            directory.worlds().collect::<Vec<_>>(),
            vec!["Ultros", "Behemoth", "Siren", "Adamantoise", "Zodiark", "Alpha"]
        );
        assert_eq!(directory.classify("Alpha"), Some(ServerKind::World));
    }
}
