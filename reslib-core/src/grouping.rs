//! Single-pass grouping of templates by category.

use indexmap::IndexMap;

use crate::types::{Category, Metadata, Template};

/// Templates sharing one category, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: &'a Category,
    pub templates: Vec<&'a Template>,
}

/// Partition the document's templates by category.
///
/// Group order is the order in which each category is first seen.
pub fn group_by_category(metadata: &Metadata) -> Vec<CategoryGroup<'_>> {
    let mut groups: IndexMap<&Category, Vec<&Template>> = IndexMap::new();
    for template in metadata.templates() {
        groups.entry(&template.category).or_default().push(template);
    }
    groups
        .into_iter()
        .map(|(category, templates)| CategoryGroup {
            category,
            templates,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TemplateId;

    fn push(meta: &mut Metadata, key: &str, category: &str) {
        meta.knowledge_blocks.insert(
            key.to_string(),
            Template {
                id: TemplateId::from(key),
                title: key.to_uppercase(),
                summary: None,
                tags: None,
                category: Category::from(category),
                difficulty: None,
                content_files: None,
            },
        );
    }

    #[test]
    fn first_seen_category_order_is_kept() {
        let mut meta = Metadata::default();
        push(&mut meta, "a", "Marketing");
        push(&mut meta, "b", "Finance");
        push(&mut meta, "c", "Marketing");
        push(&mut meta, "d", "Legal");

        let groups = group_by_category(&meta);
        let names: Vec<_> = groups.iter().map(|g| g.category.0.as_str()).collect();
        assert_eq!(names, vec!["Marketing", "Finance", "Legal"]);

        let marketing: Vec<_> = groups[0].templates.iter().map(|t| t.id.0.as_str()).collect();
        assert_eq!(marketing, vec!["a", "c"]);
    }

    #[test]
    fn every_template_lands_in_exactly_one_group() {
        let mut meta = Metadata::default();
        for (i, cat) in ["x", "y", "x", "z", "y"].iter().enumerate() {
            push(&mut meta, &format!("k{i}"), cat);
        }
        let total: usize = group_by_category(&meta).iter().map(|g| g.templates.len()).sum();
        assert_eq!(total, meta.len());
    }

    #[test]
    fn empty_document_has_no_groups() {
        assert!(group_by_category(&Metadata::default()).is_empty());
    }
}
