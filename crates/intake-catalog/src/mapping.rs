//! Mapping configuration loading.
//!
//! The mapping source is a TOML document with a `[[templates]]` array. A
//! present file without any templates is a valid no-op configuration; a
//! missing or unparseable file is a structural error that aborts the
//! pipeline before any document is touched.

use std::path::Path;

use anyhow::{Context, Result};

use intake_model::MappingConfig;

/// Load the mapping configuration from its TOML source.
pub fn load_mapping_config(path: &Path) -> Result<MappingConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read mapping configuration: {}", path.display()))?;
    let config: MappingConfig = toml::from_str(&text)
        .with_context(|| format!("parse mapping configuration: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_model::ValueType;

    #[test]
    fn parses_templates_with_explicit_mappings() {
        let text = r#"
[[templates]]
source_file = "shinsei.xml"
output_file = "filled_shinsei.xml"
template_key = "shinsei"
source_form_files = ["shinsei.xml", "besshi.xml"]

[templates.mappings.APPLICANT_NAME]
sheet = "様式1"
cell = "C5"
type = "text"

[templates.mappings.GRANT_DATE]
sheet = "様式1"
cell = "D8"
type = "date_wareki"

[[templates]]
source_file = "yakuin.xml"
"#;
        let config: MappingConfig = toml::from_str(text).expect("parse");
        assert_eq!(config.templates.len(), 2);

        let first = &config.templates[0];
        assert_eq!(first.key(), "shinsei");
        assert_eq!(first.mappings.len(), 2);
        assert_eq!(
            first.mappings["GRANT_DATE"].value_type,
            ValueType::DateWareki
        );
        assert_eq!(
            first.auto_source_forms(),
            vec!["shinsei.xml".to_string(), "besshi.xml".to_string()]
        );

        let second = &config.templates[1];
        assert_eq!(second.key(), "yakuin.xml");
        assert_eq!(second.output_name(), "filled_yakuin.xml");
        assert!(second.mappings.is_empty());
    }

    #[test]
    fn absent_template_list_defaults_to_empty() {
        let config: MappingConfig = toml::from_str("").expect("parse");
        assert!(config.templates.is_empty());
    }
}
