use crate::models::{ListFilter, Product};

/// Products matching `filter` and, when non-blank, containing `query`
/// (case-insensitive) in name, lot or expiry text. List order is kept.
pub fn filter_products<'a>(
    products: &'a [Product],
    filter: ListFilter,
    query: Option<&str>,
) -> Vec<&'a Product> {
    let needle = query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    products
        .iter()
        .filter(|p| filter.matches(p))
        .filter(|p| match &needle {
            None => true,
            Some(n) => [&p.name, &p.lot, &p.expiry_text]
                .iter()
                .any(|f| f.to_lowercase().contains(n.as_str())),
        })
        .collect()
}
