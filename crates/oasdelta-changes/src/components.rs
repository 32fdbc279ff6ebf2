//! Top-level components comparison.
//!
//! The nine sub-collections of a components container are independent, so
//! each one is diffed on its own scoped thread. Workers report over a
//! channel; results are merged in a fixed field order, so the final change
//! log is deterministic regardless of which worker finishes first. A
//! panicking worker is caught and surfaced as a typed error instead of
//! poisoning the fan-in.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread;

use oasdelta_model::v2::{Definitions, DEFINITIONS_LABEL, SECURITY_DEFINITIONS_LABEL};
use oasdelta_model::v3::{
    Components, CALLBACKS_LABEL, EXAMPLES_LABEL, HEADERS_LABEL, LINKS_LABEL, PARAMETERS_LABEL,
    REQUEST_BODIES_LABEL, RESPONSES_LABEL, SCHEMAS_LABEL, SECURITY_SCHEMES_LABEL,
};
use oasdelta_model::{ContentHash, NodeRef};

use crate::change::{map_totals, option_totals, Change, ChangeTotals, PropertyChanges};
use crate::compare::{
    compare_callbacks, compare_examples, compare_headers, compare_links, compare_parameters,
    compare_request_bodies, compare_responses, compare_schemas, compare_security_schemes,
    CallbackChanges, ExampleChanges, HeaderChanges, LinkChanges, ParameterChanges,
    RequestBodyChanges, ResponseChanges, SchemaChanges, SecuritySchemeChanges,
};
use crate::error::{CompareError, CompareResult};
use crate::extensions::{compare_extensions, ExtensionChanges};
use crate::map_diff::diff_object_map;

/// A components container tagged with its document format.
#[derive(Clone, Debug)]
pub enum VersionedComponents {
    /// The nested components object of the newer format.
    V3(Arc<Components>),
    /// The flat definitions maps of the older format.
    V2(Arc<Definitions>),
}

impl VersionedComponents {
    fn format_name(&self) -> &'static str {
        match self {
            VersionedComponents::V3(_) => "components",
            VersionedComponents::V2(_) => "definitions",
        }
    }
}

/// The sub-collections of a components container, in merge order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum ComponentField {
    Schemas,
    Responses,
    Parameters,
    Examples,
    RequestBodies,
    Headers,
    SecuritySchemes,
    Links,
    Callbacks,
}

impl ComponentField {
    const ALL: [ComponentField; 9] = [
        ComponentField::Schemas,
        ComponentField::Responses,
        ComponentField::Parameters,
        ComponentField::Examples,
        ComponentField::RequestBodies,
        ComponentField::Headers,
        ComponentField::SecuritySchemes,
        ComponentField::Links,
        ComponentField::Callbacks,
    ];

    fn label(self) -> &'static str {
        match self {
            ComponentField::Schemas => SCHEMAS_LABEL,
            ComponentField::Responses => RESPONSES_LABEL,
            ComponentField::Parameters => PARAMETERS_LABEL,
            ComponentField::Examples => EXAMPLES_LABEL,
            ComponentField::RequestBodies => REQUEST_BODIES_LABEL,
            ComponentField::Headers => HEADERS_LABEL,
            ComponentField::SecuritySchemes => SECURITY_SCHEMES_LABEL,
            ComponentField::Links => LINKS_LABEL,
            ComponentField::Callbacks => CALLBACKS_LABEL,
        }
    }
}

/// One worker's nested results, tagged by field.
#[derive(Debug)]
enum FieldDiff {
    Schemas(BTreeMap<String, SchemaChanges>),
    Responses(BTreeMap<String, ResponseChanges>),
    Parameters(BTreeMap<String, ParameterChanges>),
    Examples(BTreeMap<String, ExampleChanges>),
    RequestBodies(BTreeMap<String, RequestBodyChanges>),
    Headers(BTreeMap<String, HeaderChanges>),
    SecuritySchemes(BTreeMap<String, SecuritySchemeChanges>),
    Links(BTreeMap<String, LinkChanges>),
    Callbacks(BTreeMap<String, CallbackChanges>),
}

type WorkerOutcome = Result<(Vec<Change>, FieldDiff), Box<dyn Any + Send>>;

/// One worker's unit of work: diff a single sub-collection under a panic
/// guard, so a faulty comparator is reported instead of stalling the
/// fan-in.
fn field_outcome<T, C, F>(
    field: ComponentField,
    left: &BTreeMap<String, NodeRef<Arc<T>>>,
    right: &BTreeMap<String, NodeRef<Arc<T>>>,
    compare: F,
) -> WorkerOutcome
where
    T: ContentHash,
    F: Fn(&T, &T) -> Option<C>,
    FieldDiff: From<BTreeMap<String, C>>,
{
    panic::catch_unwind(AssertUnwindSafe(|| {
        let mut log = Vec::new();
        let diff = diff_object_map(left, right, field.label(), &mut log, compare);
        (log, FieldDiff::from(diff))
    }))
}

fn worker_panicked(field: ComponentField, payload: Box<dyn Any + Send>) -> CompareError {
    CompareError::WorkerPanicked {
        field: field.label(),
        message: panic_message(payload),
    }
}

/// Detected differences between two components containers.
#[derive(Clone, Debug, Default)]
pub struct ComponentsChanges {
    pub changes: PropertyChanges,
    pub schemas: BTreeMap<String, SchemaChanges>,
    pub responses: BTreeMap<String, ResponseChanges>,
    pub parameters: BTreeMap<String, ParameterChanges>,
    pub examples: BTreeMap<String, ExampleChanges>,
    pub request_bodies: BTreeMap<String, RequestBodyChanges>,
    pub headers: BTreeMap<String, HeaderChanges>,
    pub security_schemes: BTreeMap<String, SecuritySchemeChanges>,
    pub links: BTreeMap<String, LinkChanges>,
    pub callbacks: BTreeMap<String, CallbackChanges>,
    pub extensions: Option<ExtensionChanges>,
}

impl ChangeTotals for ComponentsChanges {
    fn total_changes(&self) -> usize {
        self.changes.total_changes()
            + map_totals(&self.schemas).0
            + map_totals(&self.responses).0
            + map_totals(&self.parameters).0
            + map_totals(&self.examples).0
            + map_totals(&self.request_bodies).0
            + map_totals(&self.headers).0
            + map_totals(&self.security_schemes).0
            + map_totals(&self.links).0
            + map_totals(&self.callbacks).0
            + option_totals(&self.extensions).0
    }

    fn total_breaking_changes(&self) -> usize {
        self.changes.total_breaking_changes()
            + map_totals(&self.schemas).1
            + map_totals(&self.responses).1
            + map_totals(&self.parameters).1
            + map_totals(&self.examples).1
            + map_totals(&self.request_bodies).1
            + map_totals(&self.headers).1
            + map_totals(&self.security_schemes).1
            + map_totals(&self.links).1
            + map_totals(&self.callbacks).1
            + option_totals(&self.extensions).1
    }
}

/// Compare two components containers of the same document format.
///
/// Returns `Ok(None)` when the containers do not differ. Mixing formats is
/// an error rather than a diff.
pub fn compare_components(
    left: &VersionedComponents,
    right: &VersionedComponents,
) -> CompareResult<Option<ComponentsChanges>> {
    match (left, right) {
        (VersionedComponents::V3(l), VersionedComponents::V3(r)) => compare_v3(l, r),
        (VersionedComponents::V2(l), VersionedComponents::V2(r)) => Ok(compare_v2(l, r)),
        (l, r) => Err(CompareError::FormatMismatch {
            left: l.format_name(),
            right: r.format_name(),
        }),
    }
}

fn compare_v3(l: &Components, r: &Components) -> CompareResult<Option<ComponentsChanges>> {
    if l.content_hash() == r.content_hash() {
        return Ok(None);
    }

    let mut outcomes: BTreeMap<ComponentField, WorkerOutcome> = BTreeMap::new();
    thread::scope(|scope| -> CompareResult<()> {
        let (tx, rx) = mpsc::channel::<(ComponentField, WorkerOutcome)>();
        let mut dispatched = 0usize;

        // Collections empty on both sides get no worker.
        macro_rules! dispatch {
            ($field:expr, $member:ident, $compare:expr) => {{
                let field = $field;
                if !(l.$member.is_empty() && r.$member.is_empty()) {
                    let tx = tx.clone();
                    dispatched += 1;
                    tracing::debug!(collection = field.label(), "dispatching comparison worker");
                    scope.spawn(move || {
                        let outcome = field_outcome(field, &l.$member, &r.$member, $compare);
                        let _ = tx.send((field, outcome));
                    });
                }
            }};
        }

        dispatch!(ComponentField::Schemas, schemas, compare_schemas);
        dispatch!(ComponentField::Responses, responses, compare_responses);
        dispatch!(ComponentField::Parameters, parameters, compare_parameters);
        dispatch!(ComponentField::Examples, examples, compare_examples);
        dispatch!(ComponentField::RequestBodies, request_bodies, compare_request_bodies);
        dispatch!(ComponentField::Headers, headers, compare_headers);
        dispatch!(ComponentField::SecuritySchemes, security_schemes, compare_security_schemes);
        dispatch!(ComponentField::Links, links, compare_links);
        dispatch!(ComponentField::Callbacks, callbacks, compare_callbacks);
        drop(tx);

        for _ in 0..dispatched {
            let (field, outcome) = rx.recv().map_err(|_| CompareError::ResultChannelClosed)?;
            outcomes.insert(field, outcome);
        }
        Ok(())
    })?;

    let mut result = ComponentsChanges::default();
    let mut changes = Vec::new();
    for field in ComponentField::ALL {
        let Some(outcome) = outcomes.remove(&field) else {
            continue;
        };
        match outcome {
            Ok((log, diff)) => {
                changes.extend(log);
                result.assign(diff);
            }
            Err(payload) => {
                return Err(worker_panicked(field, payload));
            }
        }
    }
    result.extensions = compare_extensions(&l.extensions, &r.extensions);
    result.changes = PropertyChanges::new(changes);

    Ok((result.total_changes() > 0).then_some(result))
}

// Four flat maps; no fan-out needed at this scale.
fn compare_v2(l: &Definitions, r: &Definitions) -> Option<ComponentsChanges> {
    if l.content_hash() == r.content_hash() {
        return None;
    }

    let mut result = ComponentsChanges::default();
    let mut changes = Vec::new();
    result.schemas =
        diff_object_map(&l.schemas, &r.schemas, DEFINITIONS_LABEL, &mut changes, compare_schemas);
    result.parameters = diff_object_map(
        &l.parameters,
        &r.parameters,
        PARAMETERS_LABEL,
        &mut changes,
        compare_parameters,
    );
    result.responses = diff_object_map(
        &l.responses,
        &r.responses,
        RESPONSES_LABEL,
        &mut changes,
        compare_responses,
    );
    result.security_schemes = diff_object_map(
        &l.security_definitions,
        &r.security_definitions,
        SECURITY_DEFINITIONS_LABEL,
        &mut changes,
        compare_security_schemes,
    );
    result.extensions = compare_extensions(&l.extensions, &r.extensions);
    result.changes = PropertyChanges::new(changes);

    (result.total_changes() > 0).then_some(result)
}

impl ComponentsChanges {
    fn assign(&mut self, diff: FieldDiff) {
        match diff {
            FieldDiff::Schemas(d) => self.schemas = d,
            FieldDiff::Responses(d) => self.responses = d,
            FieldDiff::Parameters(d) => self.parameters = d,
            FieldDiff::Examples(d) => self.examples = d,
            FieldDiff::RequestBodies(d) => self.request_bodies = d,
            FieldDiff::Headers(d) => self.headers = d,
            FieldDiff::SecuritySchemes(d) => self.security_schemes = d,
            FieldDiff::Links(d) => self.links = d,
            FieldDiff::Callbacks(d) => self.callbacks = d,
        }
    }
}

impl From<BTreeMap<String, SchemaChanges>> for FieldDiff {
    fn from(d: BTreeMap<String, SchemaChanges>) -> Self {
        FieldDiff::Schemas(d)
    }
}
impl From<BTreeMap<String, ResponseChanges>> for FieldDiff {
    fn from(d: BTreeMap<String, ResponseChanges>) -> Self {
        FieldDiff::Responses(d)
    }
}
impl From<BTreeMap<String, ParameterChanges>> for FieldDiff {
    fn from(d: BTreeMap<String, ParameterChanges>) -> Self {
        FieldDiff::Parameters(d)
    }
}
impl From<BTreeMap<String, ExampleChanges>> for FieldDiff {
    fn from(d: BTreeMap<String, ExampleChanges>) -> Self {
        FieldDiff::Examples(d)
    }
}
impl From<BTreeMap<String, RequestBodyChanges>> for FieldDiff {
    fn from(d: BTreeMap<String, RequestBodyChanges>) -> Self {
        FieldDiff::RequestBodies(d)
    }
}
impl From<BTreeMap<String, HeaderChanges>> for FieldDiff {
    fn from(d: BTreeMap<String, HeaderChanges>) -> Self {
        FieldDiff::Headers(d)
    }
}
impl From<BTreeMap<String, SecuritySchemeChanges>> for FieldDiff {
    fn from(d: BTreeMap<String, SecuritySchemeChanges>) -> Self {
        FieldDiff::SecuritySchemes(d)
    }
}
impl From<BTreeMap<String, LinkChanges>> for FieldDiff {
    fn from(d: BTreeMap<String, LinkChanges>) -> Self {
        FieldDiff::Links(d)
    }
}
impl From<BTreeMap<String, CallbackChanges>> for FieldDiff {
    fn from(d: BTreeMap<String, CallbackChanges>) -> Self {
        FieldDiff::Callbacks(d)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
