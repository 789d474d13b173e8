//! Wizard step grouping.
//!
//! Groups catalog fields by `step_key` for guided entry. Irrelevant to the
//! export pipeline itself; carried as catalog metadata for display.

use std::collections::BTreeMap;

use intake_model::FieldDef;

/// One wizard step: a key, a display title and the fields it covers.
#[derive(Debug, Clone)]
pub struct StepGroup<'a> {
    pub step_key: String,
    pub step_title: String,
    pub fields: Vec<&'a FieldDef>,
}

/// Group fields by step key, preserving catalog order. Fields without a
/// step key group under `form_name:sheet`; the first title seen wins.
pub fn build_step_groups(fields: &[FieldDef]) -> Vec<StepGroup<'_>> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<String, StepGroup<'_>> = BTreeMap::new();

    for (position, field) in fields.iter().enumerate() {
        let step_key = match field.step_key.as_deref() {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => format!(
                "{}:{}",
                field.form_name.as_deref().unwrap_or(""),
                field.sheet.as_deref().unwrap_or("")
            ),
        };
        let step_title = field
            .step_title
            .clone()
            .or_else(|| field.sheet.clone())
            .or_else(|| field.form_name.clone())
            .unwrap_or_else(|| format!("Step {}", position + 1));

        let group = groups.entry(step_key.clone()).or_insert_with(|| {
            order.push(step_key.clone());
            StepGroup {
                step_key,
                step_title,
                fields: Vec::new(),
            }
        });
        group.fields.push(field);
    }

    order
        .into_iter()
        .filter_map(|key| groups.remove(&key))
        .collect()
}
