use super::ScenarioGenerator;
use crate::analysis::{EndpointAnalysis, FieldKind};
use crate::scenario::builder::ScenarioBuilder;
use crate::scenario::request::{targets, validation_status, RequestPlan, Target};
use crate::scenario::types::{ScenarioType, TestScenario};
use crate::scenario::values;
use crate::spec::ParameterLocation;
use serde_json::Value;

/// One invalid input for one field.
#[derive(Debug, Clone, PartialEq)]
enum Violation {
    Missing,
    WrongType(Value),
    BelowMinimum(Value),
    AboveMaximum(Value),
    TooShort(Value),
    TooLong(Value),
    TooFewItems(Value),
    TooManyItems(Value),
    OutsideEnum(Value),
    PatternMismatch(Value),
}

impl Violation {
    fn title(&self, target: &Target<'_>) -> String {
        let label = target.label();
        match self {
            Violation::Missing => format!("Reject request missing the required {label}"),
            Violation::WrongType(_) => format!("Reject wrong type for the {label}"),
            Violation::BelowMinimum(_) => format!("Reject {label} below its minimum"),
            Violation::AboveMaximum(_) => format!("Reject {label} above its maximum"),
            Violation::TooShort(_) => format!("Reject {label} shorter than its minimum length"),
            Violation::TooLong(_) => format!("Reject {label} longer than its maximum length"),
            Violation::TooFewItems(_) => format!("Reject {label} with too few items"),
            Violation::TooManyItems(_) => format!("Reject {label} with too many items"),
            Violation::OutsideEnum(_) => format!("Reject {label} outside its allowed values"),
            Violation::PatternMismatch(_) => format!("Reject {label} not matching its pattern"),
        }
    }

    fn value(&self) -> Option<&Value> {
        match self {
            Violation::Missing => None,
            Violation::WrongType(v)
            | Violation::BelowMinimum(v)
            | Violation::AboveMaximum(v)
            | Violation::TooShort(v)
            | Violation::TooLong(v)
            | Violation::TooFewItems(v)
            | Violation::TooManyItems(v)
            | Violation::OutsideEnum(v)
            | Violation::PatternMismatch(v) => Some(v),
        }
    }
}

/// Violations for one field, in constraint-class order.
fn violations(target: &Target<'_>) -> Vec<Violation> {
    let c = target.constraints;
    let mut out = Vec::new();

    // a path without its segment is a different route, not a validation failure
    if target.required && target.location != Some(ParameterLocation::Path) {
        out.push(Violation::Missing);
    }

    // parameters travel as text, so only non-string kinds can be mistyped
    let typed = !target.is_parameter() || c.kind != FieldKind::String;
    if typed {
        if let Some(v) = values::wrong_type_value(c.kind) {
            out.push(Violation::WrongType(v));
        }
    }

    if c.kind.is_numeric() {
        out.extend(values::below_minimum(c).map(Violation::BelowMinimum));
        out.extend(values::above_maximum(c).map(Violation::AboveMaximum));
    }
    if c.kind == FieldKind::String {
        out.extend(values::too_short(c).map(Violation::TooShort));
        out.extend(values::too_long(c).map(Violation::TooLong));
    }
    if c.kind == FieldKind::Array {
        out.extend(values::too_few_items(target.schema, c).map(Violation::TooFewItems));
        out.extend(values::too_many_items(target.schema, c).map(Violation::TooManyItems));
    }
    out.extend(values::out_of_enum_value(c).map(Violation::OutsideEnum));
    if c.kind == FieldKind::String && !c.has_enum() {
        out.extend(values::pattern_mismatch(c).map(Violation::PatternMismatch));
    }
    out
}

/// One scenario per violated constraint class per field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationErrorGenerator;

impl ScenarioGenerator for ValidationErrorGenerator {
    fn scenario_type(&self) -> ScenarioType {
        ScenarioType::ValidationError
    }

    fn can_generate(&self, analysis: &EndpointAnalysis) -> bool {
        targets(analysis).iter().any(|t| !violations(t).is_empty())
    }

    fn generate(&self, analysis: &EndpointAnalysis) -> Vec<TestScenario> {
        let status = validation_status(analysis);
        let mut scenarios = Vec::new();

        for target in targets(analysis) {
            for violation in violations(&target) {
                let mut plan = RequestPlan::required_only(analysis);
                match violation.value() {
                    Some(value) => {
                        plan.set(&target, value.clone());
                    }
                    None => {
                        plan.omit(&target);
                    }
                }

                let mut builder = ScenarioBuilder::new(ScenarioType::ValidationError, violation.title(&target));
                plan.write_request(&mut builder);
                builder.then(status.step());
                builder.then(format!(
                    "the response should report a validation error for \"{}\"",
                    target.name
                ));
                scenarios.push(builder.build());
            }
        }
        scenarios
    }
}
