use std::collections::BTreeSet;

use utoipa::openapi::OpenApi;

/// Operation count and tag set, read back from a finished document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractSummary {
    pub operation_count: usize,
    pub tags: BTreeSet<String>,
}

impl ContractSummary {
    /// Scans `paths`, so the numbers describe what was actually produced.
    pub fn scan(doc: &OpenApi) -> Self {
        let mut summary = Self::default();

        for item in doc.paths.paths.values() {
            let operations = [
                &item.get,
                &item.put,
                &item.post,
                &item.delete,
                &item.options,
                &item.head,
                &item.patch,
                &item.trace,
            ];
            for op in operations.into_iter().flatten() {
                summary.operation_count += 1;
                summary.tags.extend(op.tags.iter().flatten().cloned());
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::contract::{ContractGenerator, SecuritySchemeDef, ServiceInfo};
    use crate::config::AppConfig;

    #[test]
    fn counts_the_standard_contract() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let doc = ContractGenerator::new(ServiceInfo::from_config(&config), [SecuritySchemeDef::bearer_jwt()])
            .generate(&Catalog::standard().unwrap())
            .unwrap();

        let summary = ContractSummary::scan(&doc);
        assert_eq!(summary.operation_count, 15);
        assert_eq!(
            summary.tags.into_iter().collect::<Vec<_>>(),
            vec!["Addresses", "Contacts", "Users"]
        );
    }

    #[test]
    fn empty_document_is_empty() {
        let doc = utoipa::openapi::OpenApiBuilder::new().build();
        assert_eq!(ContractSummary::scan(&doc), ContractSummary::default());
    }
}
