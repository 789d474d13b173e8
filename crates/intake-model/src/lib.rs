pub mod answer;
pub mod field;
pub mod issue;
pub mod mapping;
pub mod value;

pub use answer::{AnswerSet, NormalizedAnswer, RawAnswers};
pub use field::FieldDef;
pub use issue::{IssueSeverity, MappingNote, ValidationIssue, count_issues};
pub use mapping::{ExplicitMapping, MappingConfig, TemplateSpec};
pub use value::{CellScalar, ValueType};
