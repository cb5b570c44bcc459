use serde_json::json;

use printmarket_core::ProductRegistry;

use crate::commands::CommandResult;

pub fn run(registry: &ProductRegistry) -> CommandResult {
    let products: Vec<_> = registry
        .slugs()
        .map(|slug| {
            let config = registry.config_for(slug);
            json!({
                "slug": slug,
                "sizes": config.sizes.iter().map(|c| c.value.as_str()).collect::<Vec<_>>(),
                "paper_types": config.paper_types.iter().map(|c| c.value.as_str()).collect::<Vec<_>>(),
                "color_options": config.color_options.iter().map(|c| c.value.as_str()).collect::<Vec<_>>(),
                "has_file_upload": config.has_file_upload,
                "has_deadline": config.has_deadline,
                "custom_fields": config.custom_fields.iter().map(|f| f.key.as_str()).collect::<Vec<_>>(),
            })
        })
        .collect();

    let count = products.len();
    CommandResult::success_with_data(
        "products",
        format!("{count} product types in the catalog"),
        Some(json!({ "products": products })),
    )
}
