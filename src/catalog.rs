//! Training-program catalog
//!
//! Static mapping of Mintrud program code to the canonical Russian program
//! title. The standard table covers every admitted code (1-29, excluding 5);
//! callers may override single titles at construction time. The catalog is
//! immutable once built and passed explicitly into record assembly — there is
//! no process-global override hook.

use crate::values::LearnProgramId;
use indexmap::IndexMap;

/// The built-in code/title table, in code order
const STANDARD_TITLES: &[(u8, &str)] = &[
    (1, "Обучение по общим вопросам охраны труда и функционирования системы управления охраной труда"),
    (2, "Обучение безопасным методам и приемам выполнения работ при воздействии вредных и (или) опасных производственных факторов, источников опасности"),
    (3, "Обучение безопасным методам и приемам выполнения работ повышенной опасности"),
    (4, "Обучение по оказанию первой помощи пострадавшим"),
    (6, "Обучение по использованию (применению) средств индивидуальной защиты"),
    (7, "Обучение безопасным методам и приемам выполнения работ на высоте"),
    (8, "Обучение безопасным методам и приемам выполнения работ в ограниченных и замкнутых пространствах"),
    (9, "Обучение безопасным методам и приемам выполнения работ в электроустановках"),
    (10, "Обучение безопасным методам и приемам выполнения работ, связанных с эксплуатацией подъемных сооружений"),
    (11, "Обучение безопасным методам и приемам выполнения работ в тепловых энергоустановках"),
    (12, "Обучение безопасным методам и приемам выполнения газоопасных работ"),
    (13, "Обучение безопасным методам и приемам выполнения огневых работ"),
    (14, "Обучение безопасным методам и приемам выполнения работ, связанных с эксплуатацией сосудов, работающих под избыточным давлением"),
    (15, "Обучение безопасным методам и приемам выполнения земляных работ"),
    (16, "Обучение безопасным методам и приемам выполнения работ по обслуживанию и ремонту зданий и сооружений"),
    (17, "Обучение безопасным методам и приемам выполнения работ по валке, сплаву и обрезке деревьев"),
    (18, "Обучение безопасным методам и приемам выполнения погрузочно-разгрузочных работ"),
    (19, "Обучение безопасным методам и приемам выполнения работ с ручным инструментом, в том числе пиротехническим"),
    (20, "Обучение безопасным методам и приемам выполнения водолазных работ"),
    (21, "Обучение безопасным методам и приемам выполнения работ в сетях газораспределения и газопотребления"),
    (22, "Обучение безопасным методам и приемам выполнения взрывных работ"),
    (23, "Обучение безопасным методам и приемам выполнения работ под водой и под повышенным давлением"),
    (24, "Обучение безопасным методам и приемам выполнения пожароопасных работ"),
    (25, "Обучение безопасным методам и приемам выполнения работ на опасных производственных объектах"),
    (26, "Обучение безопасным методам и приемам выполнения работ, выполняемых с использованием грузоподъемных машин"),
    (27, "Обучение безопасным методам и приемам выполнения окрасочных работ"),
    (28, "Обучение безопасным методам и приемам выполнения электросварочных и газосварочных работ"),
    (29, "Обучение безопасным методам и приемам выполнения работ, связанных с эксплуатацией транспортных средств"),
];

/// Catalog of training-program titles keyed by Mintrud code
#[derive(Debug, Clone)]
pub struct ProgramCatalog {
    titles: IndexMap<u8, String>,
}

impl ProgramCatalog {
    /// The standard catalog with a title for every admitted code
    pub fn standard() -> Self {
        let titles = STANDARD_TITLES
            .iter()
            .map(|(code, title)| (*code, (*title).to_string()))
            .collect();
        Self { titles }
    }

    /// An empty catalog, useful when every title comes from configuration
    pub fn empty() -> Self {
        Self {
            titles: IndexMap::new(),
        }
    }

    /// Override (or add) the title for one program code
    ///
    /// Taking a [`LearnProgramId`] keeps codes outside the admitted domain
    /// out of the catalog entirely.
    pub fn with_title(mut self, id: LearnProgramId, title: impl Into<String>) -> Self {
        self.titles.insert(id.code(), title.into());
        self
    }

    /// Look up the canonical title for a program code
    pub fn title(&self, id: LearnProgramId) -> Option<&str> {
        self.titles.get(&id.code()).map(String::as_str)
    }

    /// Whether a title is registered for the code
    pub fn contains(&self, id: LearnProgramId) -> bool {
        self.titles.contains_key(&id.code())
    }

    /// Number of registered titles
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the catalog has no titles
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Iterate over (code, title) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.titles.iter().map(|(code, title)| (*code, title.as_str()))
    }
}

impl Default for ProgramCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_covers_admitted_domain() {
        let catalog = ProgramCatalog::standard();
        assert_eq!(catalog.len(), 28);

        for code in (1..=29).filter(|c| *c != 5) {
            let id = LearnProgramId::new(code).unwrap();
            assert!(catalog.contains(id), "missing title for code {}", code);
        }
    }

    #[test]
    fn test_title_lookup() {
        let catalog = ProgramCatalog::standard();
        let id = LearnProgramId::new(4).unwrap();
        assert!(catalog.title(id).unwrap().contains("первой помощи"));
    }

    #[test]
    fn test_override_replaces_standard_title() {
        let id = LearnProgramId::new(3).unwrap();
        let catalog = ProgramCatalog::standard().with_title(id, "Работы повышенной опасности");
        assert_eq!(catalog.title(id), Some("Работы повышенной опасности"));
        assert_eq!(catalog.len(), 28);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = ProgramCatalog::empty();
        assert!(catalog.is_empty());
        assert!(!catalog.contains(LearnProgramId::new(1).unwrap()));
    }

    #[test]
    fn test_iteration_is_in_code_order() {
        let codes: Vec<u8> = ProgramCatalog::standard().iter().map(|(code, _)| code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }
}
