//! Request composition shared by the generators.
//!
//! A [`RequestPlan`] holds the parameter and body values one scenario sends.
//! Generators start from the required-only or all-fields plan, change one
//! field, and render the plan into `Given`/`When` steps.

use super::builder::ScenarioBuilder;
use super::types::DataTable;
use super::values::{minimal_value, render_cell, render_value, representative_value};
use crate::analysis::{constraints_for, EndpointAnalysis, FieldConstraints, ParameterInfo};
use crate::spec::ParameterLocation;
use serde_json::Value;
use std::collections::BTreeMap;

/// Where a field lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSlot {
    /// Parameter, by merged declaration position
    Parameter(usize),
    /// Request body property, by schema position
    Body(usize),
}

/// One request field, parameter or body property.
#[derive(Debug, Clone)]
pub struct Target<'a> {
    pub slot: TargetSlot,
    pub name: &'a str,
    pub location: Option<ParameterLocation>,
    pub required: bool,
    pub schema: &'a Value,
    pub constraints: &'a FieldConstraints,
}

impl Target<'_> {
    /// `query parameter "limit"` / `field "name"`
    pub fn label(&self) -> String {
        match self.location {
            Some(ParameterLocation::Path) => format!("path parameter \"{}\"", self.name),
            Some(ParameterLocation::Query) => format!("query parameter \"{}\"", self.name),
            Some(ParameterLocation::Header) => format!("header \"{}\"", self.name),
            Some(ParameterLocation::Cookie) => format!("cookie \"{}\"", self.name),
            None => format!("field \"{}\"", self.name),
        }
    }

    pub fn is_parameter(&self) -> bool {
        self.location.is_some()
    }
}

/// Every request field in order: parameters, then body properties.
pub fn targets(analysis: &EndpointAnalysis) -> Vec<Target<'_>> {
    let mut out: Vec<Target<'_>> = analysis
        .parameters_in_order()
        .into_iter()
        .map(|p| Target {
            slot: TargetSlot::Parameter(p.position),
            name: &p.name,
            location: Some(p.location),
            required: p.required,
            schema: &p.schema,
            constraints: &p.constraints,
        })
        .collect();

    if let Some(body) = &analysis.request_body {
        out.extend(body.fields.iter().enumerate().map(|(index, f)| Target {
            slot: TargetSlot::Body(index),
            name: &f.name,
            location: None,
            required: f.required,
            schema: &f.schema,
            constraints: &f.constraints,
        }));
    }
    out
}

/// How credentials appear in the scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Valid credentials for the first authenticated requirement
    Valid,
    /// Replace the credential steps with one custom step
    Custom(String),
}

#[derive(Debug, Clone)]
pub struct RequestPlan<'a> {
    analysis: &'a EndpointAnalysis,
    parameters: BTreeMap<usize, Value>,
    body: BTreeMap<usize, Value>,
    raw_body: Option<Value>,
    credentials: Credentials,
    notes: Vec<String>,
}

impl<'a> RequestPlan<'a> {
    fn empty(analysis: &'a EndpointAnalysis) -> Self {
        RequestPlan {
            analysis,
            parameters: BTreeMap::new(),
            body: BTreeMap::new(),
            raw_body: None,
            credentials: Credentials::Valid,
            notes: Vec::new(),
        }
    }

    /// Required parameters and body fields with minimal valid values.
    pub fn required_only(analysis: &'a EndpointAnalysis) -> Self {
        let mut plan = Self::empty(analysis);
        for p in &analysis.required_parameters {
            plan.parameters
                .insert(p.position, minimal_value(&p.schema, &p.constraints));
        }
        if let Some(body) = &analysis.request_body {
            for (index, field) in body.fields.iter().enumerate() {
                if field.required {
                    plan.body
                        .insert(index, minimal_value(&field.schema, &field.constraints));
                }
            }
            if plan.body.is_empty() && body.required {
                let constraints = constraints_for(&body.schema);
                plan.raw_body = Some(minimal_value(&body.schema, &constraints));
            }
        }
        plan
    }

    /// Every parameter and body field with representative valid values.
    pub fn all_fields(analysis: &'a EndpointAnalysis) -> Self {
        let mut plan = Self::empty(analysis);
        for p in analysis.parameters_in_order() {
            plan.parameters
                .insert(p.position, representative_value(&p.schema, &p.constraints));
        }
        if let Some(body) = &analysis.request_body {
            for (index, field) in body.fields.iter().enumerate() {
                plan.body
                    .insert(index, representative_value(&field.schema, &field.constraints));
            }
            if body.fields.is_empty() {
                let constraints = constraints_for(&body.schema);
                plan.raw_body = Some(representative_value(&body.schema, &constraints));
            }
        }
        plan
    }

    pub fn set(&mut self, target: &Target<'_>, value: Value) -> &mut Self {
        match target.slot {
            TargetSlot::Parameter(position) => {
                self.parameters.insert(position, value);
            }
            TargetSlot::Body(index) => {
                self.raw_body = None;
                self.body.insert(index, value);
            }
        }
        self
    }

    /// Leave a field out and record the omission as a step.
    pub fn omit(&mut self, target: &Target<'_>) -> &mut Self {
        match target.slot {
            TargetSlot::Parameter(position) => {
                self.parameters.remove(&position);
            }
            TargetSlot::Body(index) => {
                self.body.remove(&index);
            }
        }
        self.notes.push(format!("the request omits the {}", target.label()));
        self
    }

    pub fn credentials(&mut self, credentials: Credentials) -> &mut Self {
        self.credentials = credentials;
        self
    }

    fn credential_steps(&self, builder: &mut ScenarioBuilder) {
        match &self.credentials {
            Credentials::Custom(text) => {
                builder.given(text.clone());
            }
            Credentials::Valid => {
                if !self.analysis.requires_authentication() {
                    return;
                }
                if let Some(requirement) = self.analysis.security.first() {
                    for scheme in &requirement.schemes {
                        builder.given(format!("valid \"{}\" credentials are provided", scheme.name));
                    }
                }
            }
        }
    }

    fn parameter_step(param: &ParameterInfo, value: &Value) -> String {
        let rendered = render_value(value);
        match param.location {
            ParameterLocation::Path => {
                format!("the path parameter \"{}\" is \"{}\"", param.name, rendered)
            }
            ParameterLocation::Query => {
                format!("the query parameter \"{}\" is \"{}\"", param.name, rendered)
            }
            ParameterLocation::Header => {
                format!("the request header \"{}\" is \"{}\"", param.name, rendered)
            }
            ParameterLocation::Cookie => {
                format!("the cookie \"{}\" is \"{}\"", param.name, rendered)
            }
        }
    }

    /// Write the `Given` steps and the `When` step.
    pub fn write_request(&self, builder: &mut ScenarioBuilder) {
        builder.given("the API is available");
        self.credential_steps(builder);

        for param in self.analysis.parameters_in_order() {
            if let Some(value) = self.parameters.get(&param.position) {
                builder.given(Self::parameter_step(param, value));
            }
        }

        if let Some(body) = &self.analysis.request_body {
            if !self.body.is_empty() {
                let mut table = DataTable::new(&["field", "value"]);
                for (index, value) in &self.body {
                    if let Some(field) = body.fields.get(*index) {
                        table.push_row(vec![field.name.clone(), render_cell(value)]);
                    }
                }
                builder.given_table("the request body contains:", table);
            } else if let Some(raw) = &self.raw_body {
                builder.given(format!("the request body is {}", render_cell(raw)));
            }
        }

        for note in &self.notes {
            builder.given(note.clone());
        }

        builder.when(format!(
            "I send a {} request to \"{}\"",
            self.analysis.method, self.analysis.path
        ));
    }
}

/// Expected status of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedStatus {
    Code(u16),
    /// Any client error, when only a `4XX` range is declared
    ClientError,
}

impl ExpectedStatus {
    pub fn step(&self) -> String {
        match self {
            ExpectedStatus::Code(code) => format!("the response status should be {code}"),
            ExpectedStatus::ClientError => "the response status should be 4XX".to_string(),
        }
    }
}

/// Success status plus the schema-match assertion when the schema is named.
pub fn write_success(builder: &mut ScenarioBuilder, analysis: &EndpointAnalysis) {
    builder.then(ExpectedStatus::Code(analysis.success_status()).step());
    if let Some(name) = analysis
        .success_response
        .as_ref()
        .and_then(|r| r.schema_name.as_deref())
    {
        builder.then(format!("the response body should match the \"{name}\" schema"));
    }
}

/// Status for rejected input: declared 400, else 422, else a 4XX range, else 400.
pub fn validation_status(analysis: &EndpointAnalysis) -> ExpectedStatus {
    if analysis.has_error_status(400) {
        ExpectedStatus::Code(400)
    } else if analysis.has_error_status(422) {
        ExpectedStatus::Code(422)
    } else if analysis.has_error_class() {
        ExpectedStatus::ClientError
    } else {
        ExpectedStatus::Code(400)
    }
}
