use serde::{Deserialize, Serialize};

/// One selectable option: the machine value plus the label shown to users.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionChoice {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomFieldKind {
    Text,
    Select,
    Number,
}

/// A product-type-specific attribute (e.g. book page count) not common to all
/// products. `options` is only populated for `Select` fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub key: String,
    pub label: String,
    pub kind: CustomFieldKind,
    #[serde(default)]
    pub options: Vec<OptionChoice>,
}

/// Legal configuration options for one product type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub sizes: Vec<OptionChoice>,
    pub paper_types: Vec<OptionChoice>,
    pub color_options: Vec<OptionChoice>,
    pub has_file_upload: bool,
    pub has_deadline: bool,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

/// Static per-product-type catalog of legal option values, keyed by slug.
/// Lookups never fail: unknown slugs resolve to a generic default config.
pub struct ProductRegistry {
    products: Vec<(String, ProductConfig)>,
    fallback: ProductConfig,
}

fn choice(value: &str, label: &str) -> OptionChoice {
    OptionChoice { value: value.to_string(), label: label.to_string() }
}

fn select_field(key: &str, label: &str, options: Vec<OptionChoice>) -> CustomField {
    CustomField {
        key: key.to_string(),
        label: label.to_string(),
        kind: CustomFieldKind::Select,
        options,
    }
}

fn number_field(key: &str, label: &str) -> CustomField {
    CustomField {
        key: key.to_string(),
        label: label.to_string(),
        kind: CustomFieldKind::Number,
        options: Vec::new(),
    }
}

impl ProductRegistry {
    pub fn new(products: Vec<(String, ProductConfig)>) -> Self {
        Self { products, fallback: default_config() }
    }

    /// The full print-shop catalog.
    pub fn standard() -> Self {
        Self::new(vec![
            ("business-card".to_string(), business_card()),
            ("sticker".to_string(), sticker()),
            ("calendar".to_string(), calendar()),
            ("poster".to_string(), poster()),
            ("flyer".to_string(), flyer()),
            ("brochure".to_string(), brochure()),
            ("postcard".to_string(), postcard()),
            ("book-hard".to_string(), book_hard()),
            ("magazine".to_string(), magazine()),
        ])
    }

    pub fn config_for(&self, slug: &str) -> &ProductConfig {
        self.products
            .iter()
            .find(|(known, _)| known == slug)
            .map(|(_, config)| config)
            .unwrap_or(&self.fallback)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.products.iter().any(|(known, _)| known == slug)
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|(slug, _)| slug.as_str())
    }
}

impl Default for ProductRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn default_config() -> ProductConfig {
    ProductConfig {
        sizes: vec![
            choice("a4", "A4 (210×297mm)"),
            choice("a5", "A5 (148×210mm)"),
            choice("custom", "Custom Size"),
        ],
        paper_types: vec![choice("matte-130", "Matte 130gsm"), choice("glossy-130", "Glossy 130gsm")],
        color_options: vec![
            choice("4-0", "Full Color (4+0)"),
            choice("4-4", "Full Color Both Sides (4+4)"),
        ],
        has_file_upload: true,
        has_deadline: false,
        custom_fields: Vec::new(),
    }
}

fn business_card() -> ProductConfig {
    ProductConfig {
        sizes: vec![
            choice("standard", "Standard (85×55mm)"),
            choice("square", "Square (55×55mm)"),
            choice("mini", "Mini (70×40mm)"),
            choice("custom", "Custom Size"),
        ],
        paper_types: vec![
            choice("matte-300", "Matte 300gsm"),
            choice("glossy-300", "Glossy 300gsm"),
            choice("uncoated-300", "Uncoated 300gsm"),
            choice("premium-350", "Premium 350gsm"),
        ],
        color_options: vec![
            choice("4-0", "Full Color Front (4+0)"),
            choice("4-4", "Full Color Both Sides (4+4)"),
            choice("1-0", "Black & White Front Only (1+0)"),
            choice("1-1", "Black & White Both Sides (1+1)"),
        ],
        has_file_upload: true,
        has_deadline: false,
        custom_fields: Vec::new(),
    }
}

fn sticker() -> ProductConfig {
    ProductConfig {
        sizes: vec![
            choice("small", "Small (50×50mm)"),
            choice("medium", "Medium (75×75mm)"),
            choice("large", "Large (100×100mm)"),
            choice("custom", "Custom Size"),
        ],
        paper_types: vec![
            choice("vinyl", "Vinyl (Waterproof)"),
            choice("paper", "Paper (Indoor)"),
            choice("transparent", "Transparent Vinyl"),
            choice("magnetic", "Magnetic"),
        ],
        color_options: vec![
            choice("4-0", "Full Color (4+0)"),
            choice("1-0", "Black & White (1+0)"),
        ],
        has_file_upload: true,
        has_deadline: false,
        custom_fields: vec![select_field(
            "shape",
            "Shape",
            vec![
                choice("square", "Square"),
                choice("circle", "Circle"),
                choice("rectangle", "Rectangle"),
                choice("custom", "Custom Shape"),
            ],
        )],
    }
}

fn calendar() -> ProductConfig {
    ProductConfig {
        sizes: vec![
            choice("a4", "A4 (210×297mm)"),
            choice("a3", "A3 (297×420mm)"),
            choice("a5", "A5 (148×210mm)"),
            choice("custom", "Custom Size"),
        ],
        paper_types: vec![
            choice("matte-130", "Matte 130gsm"),
            choice("matte-170", "Matte 170gsm"),
            choice("glossy-130", "Glossy 130gsm"),
            choice("glossy-170", "Glossy 170gsm"),
        ],
        color_options: vec![
            choice("4-0", "Full Color (4+0)"),
            choice("4-4", "Full Color Both Sides (4+4)"),
        ],
        has_file_upload: true,
        has_deadline: true,
        custom_fields: vec![
            number_field("year", "Year"),
            select_field(
                "language",
                "Language",
                vec![
                    choice("english", "English"),
                    choice("danish", "Danish"),
                    choice("german", "German"),
                    choice("custom", "Custom"),
                ],
            ),
        ],
    }
}

fn poster() -> ProductConfig {
    ProductConfig {
        sizes: vec![
            choice("a4", "A4 (210×297mm)"),
            choice("a3", "A3 (297×420mm)"),
            choice("a2", "A2 (420×594mm)"),
            choice("a1", "A1 (594×841mm)"),
            choice("a0", "A0 (841×1189mm)"),
            choice("custom", "Custom Size"),
        ],
        paper_types: vec![
            choice("matte-130", "Matte 130gsm"),
            choice("matte-170", "Matte 170gsm"),
            choice("glossy-130", "Glossy 130gsm"),
            choice("glossy-170", "Glossy 170gsm"),
        ],
        color_options: vec![
            choice("4-0", "Full Color (4+0)"),
            choice("1-0", "Black & White (1+0)"),
        ],
        has_file_upload: true,
        has_deadline: false,
        custom_fields: Vec::new(),
    }
}

fn flyer() -> ProductConfig {
    ProductConfig {
        sizes: vec![
            choice("a4", "A4 (210×297mm)"),
            choice("a5", "A5 (148×210mm)"),
            choice("a6", "A6 (105×148mm)"),
            choice("dl", "DL (99×210mm)"),
            choice("custom", "Custom Size"),
        ],
        paper_types: vec![
            choice("matte-90", "Matte 90gsm"),
            choice("matte-130", "Matte 130gsm"),
            choice("matte-170", "Matte 170gsm"),
            choice("glossy-130", "Glossy 130gsm"),
            choice("glossy-170", "Glossy 170gsm"),
        ],
        color_options: vec![
            choice("4-0", "Full Color Front (4+0)"),
            choice("4-4", "Full Color Both Sides (4+4)"),
            choice("4-1", "Color Front, B&W Back (4+1)"),
        ],
        has_file_upload: true,
        has_deadline: false,
        custom_fields: Vec::new(),
    }
}

fn brochure() -> ProductConfig {
    ProductConfig {
        sizes: vec![
            choice("a4", "A4 (210×297mm)"),
            choice("a5", "A5 (148×210mm)"),
            choice("a6", "A6 (105×148mm)"),
            choice("custom", "Custom Size"),
        ],
        paper_types: vec![
            choice("matte-130", "Matte 130gsm"),
            choice("matte-170", "Matte 170gsm"),
            choice("glossy-130", "Glossy 130gsm"),
            choice("glossy-170", "Glossy 170gsm"),
        ],
        color_options: vec![
            choice("4-0", "Full Color Front (4+0)"),
            choice("4-4", "Full Color Both Sides (4+4)"),
            choice("4-1", "Color Front, B&W Back (4+1)"),
        ],
        has_file_upload: true,
        has_deadline: false,
        custom_fields: vec![select_field(
            "pages",
            "Number of Pages",
            vec![
                choice("2", "2 pages"),
                choice("4", "4 pages"),
                choice("6", "6 pages"),
                choice("8", "8 pages"),
                choice("custom", "Custom"),
            ],
        )],
    }
}

fn postcard() -> ProductConfig {
    ProductConfig {
        sizes: vec![
            choice("standard", "Standard (105×148mm)"),
            choice("large", "Large (148×210mm)"),
            choice("custom", "Custom Size"),
        ],
        paper_types: vec![
            choice("matte-300", "Matte 300gsm"),
            choice("glossy-300", "Glossy 300gsm"),
            choice("uncoated-300", "Uncoated 300gsm"),
        ],
        color_options: vec![
            choice("4-0", "Full Color Front (4+0)"),
            choice("4-4", "Full Color Both Sides (4+4)"),
        ],
        has_file_upload: true,
        has_deadline: false,
        custom_fields: Vec::new(),
    }
}

fn book_hard() -> ProductConfig {
    ProductConfig {
        sizes: vec![
            choice("a5", "A5 (148×210mm)"),
            choice("a4", "A4 (210×297mm)"),
            choice("b5", "B5 (176×250mm)"),
            choice("custom", "Custom Size"),
        ],
        paper_types: vec![
            choice("matte-80", "Matte 80gsm (Text)"),
            choice("matte-130", "Matte 130gsm (Cover)"),
            choice("glossy-130", "Glossy 130gsm (Cover)"),
        ],
        color_options: vec![
            choice("4-0", "Full Color Front (4+0)"),
            choice("4-4", "Full Color Both Sides (4+4)"),
            choice("4-1", "Color Front, B&W Back (4+1)"),
        ],
        has_file_upload: true,
        has_deadline: true,
        custom_fields: vec![
            number_field("pages", "Number of Pages"),
            select_field(
                "binding",
                "Binding Type",
                vec![
                    choice("hardcover", "Hardcover"),
                    choice("softcover", "Softcover"),
                    choice("spiral", "Spiral Bound"),
                ],
            ),
        ],
    }
}

fn magazine() -> ProductConfig {
    ProductConfig {
        sizes: vec![
            choice("a4", "A4 (210×297mm)"),
            choice("a5", "A5 (148×210mm)"),
            choice("custom", "Custom Size"),
        ],
        paper_types: vec![
            choice("matte-80", "Matte 80gsm (Text)"),
            choice("matte-130", "Matte 130gsm (Cover)"),
            choice("glossy-130", "Glossy 130gsm (Cover)"),
        ],
        color_options: vec![
            choice("4-0", "Full Color Front (4+0)"),
            choice("4-4", "Full Color Both Sides (4+4)"),
            choice("4-1", "Color Front, B&W Back (4+1)"),
        ],
        has_file_upload: true,
        has_deadline: true,
        custom_fields: vec![
            number_field("pages", "Number of Pages"),
            select_field(
                "binding",
                "Binding Type",
                vec![
                    choice("stapled", "Stapled"),
                    choice("perfect", "Perfect Bound"),
                    choice("saddle", "Saddle Stitched"),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::{CustomFieldKind, ProductRegistry};

    #[test]
    fn unknown_slug_resolves_to_default_config() {
        let registry = ProductRegistry::standard();
        let config = registry.config_for("letterhead");

        assert!(!registry.contains("letterhead"));
        assert!(!config.sizes.is_empty());
        assert!(!config.paper_types.is_empty());
        assert!(!config.color_options.is_empty());
        assert!(config.has_file_upload);
        assert!(!config.has_deadline);
    }

    #[test]
    fn calendar_requires_deadline_and_declares_year_and_language() {
        let registry = ProductRegistry::standard();
        let config = registry.config_for("calendar");

        assert!(config.has_deadline);
        let keys: Vec<&str> = config.custom_fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["year", "language"]);
        assert_eq!(config.custom_fields[0].kind, CustomFieldKind::Number);
    }

    #[test]
    fn sticker_declares_shape_choices() {
        let registry = ProductRegistry::standard();
        let config = registry.config_for("sticker");

        assert!(!config.has_deadline);
        let shape = config.custom_fields.iter().find(|f| f.key == "shape").expect("shape field");
        assert_eq!(shape.kind, CustomFieldKind::Select);
        let values: Vec<&str> = shape.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["square", "circle", "rectangle", "custom"]);
    }

    #[test]
    fn poster_offers_the_full_a_series() {
        let registry = ProductRegistry::standard();
        let values: Vec<&str> =
            registry.config_for("poster").sizes.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["a4", "a3", "a2", "a1", "a0", "custom"]);
    }

    #[test]
    fn catalog_lists_slugs_in_insertion_order() {
        let registry = ProductRegistry::standard();
        let slugs: Vec<&str> = registry.slugs().collect();
        assert_eq!(slugs.first().copied(), Some("business-card"));
        assert_eq!(slugs.len(), 9);
        assert!(slugs.contains(&"magazine"));
    }
}
