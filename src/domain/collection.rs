// Collection domain model
/// An upstream reading collection (one monitored tank/reservoir).
#[derive(Debug, Clone)]
pub struct Collection {
    pub id: String,
    pub name: String,
}

impl Collection {
    pub fn new(id: String) -> Self {
        let name = Self::format_name(&id);
        Self { id, name }
    }

    fn format_name(id: &str) -> String {
        // Convert "caixa_dagua_2" to "Caixa dagua 2"
        let spaced = id.trim_end_matches('_').replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => spaced,
        }
    }
}
