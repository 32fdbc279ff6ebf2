//! Parameter comparison.

use oasdelta_model::v3::Parameter;
use oasdelta_model::ContentHash;

use crate::change::{option_totals, ChangeTotals, PropertyChanges};
use crate::compare::schema::{compare_schemas, SchemaChanges};
use crate::extensions::{compare_extensions, ExtensionChanges};
use crate::property::{check_nested, check_required_flag, check_scalar};

/// Detected differences between two parameters.
#[derive(Clone, Debug, Default)]
pub struct ParameterChanges {
    pub changes: PropertyChanges,
    pub schema: Option<SchemaChanges>,
    pub extensions: Option<ExtensionChanges>,
}

impl ChangeTotals for ParameterChanges {
    fn total_changes(&self) -> usize {
        self.changes.total_changes()
            + option_totals(&self.schema).0
            + option_totals(&self.extensions).0
    }

    fn total_breaking_changes(&self) -> usize {
        self.changes.total_breaking_changes()
            + option_totals(&self.schema).1
            + option_totals(&self.extensions).1
    }
}

/// Compare two parameters. Returns `None` when they do not differ.
///
/// Identity and serialization fields (`name`, `in`, `required`, `style`,
/// `explode`, `allowEmptyValue`) are breaking; documentation and examples
/// are not.
pub fn compare_parameters(l: &Parameter, r: &Parameter) -> Option<ParameterChanges> {
    if l.content_hash() == r.content_hash() {
        return None;
    }

    let mut changes = Vec::new();
    check_scalar("name", &l.name, &r.name, true, &mut changes);
    check_scalar("in", &l.location, &r.location, true, &mut changes);
    check_scalar("description", &l.description, &r.description, false, &mut changes);
    check_required_flag(&l.required, &r.required, &mut changes);
    check_scalar("deprecated", &l.deprecated, &r.deprecated, false, &mut changes);
    check_scalar("allowEmptyValue", &l.allow_empty_value, &r.allow_empty_value, true, &mut changes);
    check_scalar("style", &l.style, &r.style, true, &mut changes);
    check_scalar("explode", &l.explode, &r.explode, true, &mut changes);
    let schema = check_nested("schema", &l.schema, &r.schema, true, &mut changes, compare_schemas);
    check_scalar("example", &l.example, &r.example, false, &mut changes);
    let extensions = compare_extensions(&l.extensions, &r.extensions);

    let result = ParameterChanges {
        changes: PropertyChanges::new(changes),
        schema,
        extensions,
    };
    (result.total_changes() > 0).then_some(result)
}
