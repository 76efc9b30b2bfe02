use crate::spec::ParameterLocation;
use serde::Serialize;
use serde_json::Value;

/// JSON Schema primitive kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Unknown,
}

impl FieldKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "string" => FieldKind::String,
            "integer" => FieldKind::Integer,
            "number" => FieldKind::Number,
            "boolean" => FieldKind::Boolean,
            "array" => FieldKind::Array,
            "object" => FieldKind::Object,
            _ => FieldKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
            FieldKind::Unknown => "unknown",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Number)
    }
}

/// Constraints read off a resolved schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldConstraints {
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unique_items: bool,
    pub nullable: bool,
}

impl FieldConstraints {
    pub fn unconstrained(kind: FieldKind) -> Self {
        FieldConstraints {
            kind,
            format: None,
            minimum: None,
            maximum: None,
            exclusive_minimum: false,
            exclusive_maximum: false,
            multiple_of: None,
            min_length: None,
            max_length: None,
            pattern: None,
            enum_values: Vec::new(),
            min_items: None,
            max_items: None,
            unique_items: false,
            nullable: false,
        }
    }

    pub fn has_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }
}

/// A resolved parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterInfo {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: Value,
    pub constraints: FieldConstraints,
    /// Position in the merged declaration order (path-level first)
    pub position: usize,
}

/// One top-level property of a request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldInfo {
    pub name: String,
    pub required: bool,
    pub schema: Value,
    pub constraints: FieldConstraints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBodyInfo {
    pub content_type: String,
    pub required: bool,
    /// Fully resolved and flattened schema
    pub schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    /// Top-level properties in schema order
    pub fields: Vec<FieldInfo>,
}

impl RequestBodyInfo {
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn optional_fields(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.iter().filter(|f| !f.required)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseInfo {
    /// Status key as declared (`"200"`, `"4XX"`, `"default"`)
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
}

impl ResponseInfo {
    /// Top-level property names of the response schema.
    pub fn property_names(&self) -> Vec<&str> {
        self.schema
            .as_ref()
            .and_then(|s| s.get("properties"))
            .and_then(Value::as_object)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Definition of a security scheme from `components.securitySchemes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SecuritySchemeKind {
    ApiKey {
        location: String,
        parameter: String,
    },
    Http {
        scheme: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
    },
    #[serde(rename = "oauth2")]
    OAuth2,
    OpenIdConnect,
    MutualTls,
    Unknown,
}

impl SecuritySchemeKind {
    /// Human label for the credential this scheme expects.
    pub fn credential_label(&self) -> String {
        match self {
            SecuritySchemeKind::ApiKey { location, parameter } => {
                format!("API key in {location} \"{parameter}\"")
            }
            SecuritySchemeKind::Http { scheme, .. } if scheme.eq_ignore_ascii_case("bearer") => {
                "bearer token".to_string()
            }
            SecuritySchemeKind::Http { scheme, .. } => format!("HTTP {scheme} credentials"),
            SecuritySchemeKind::OAuth2 => "OAuth2 access token".to_string(),
            SecuritySchemeKind::OpenIdConnect => "OpenID Connect token".to_string(),
            SecuritySchemeKind::MutualTls => "client certificate".to_string(),
            SecuritySchemeKind::Unknown => "credentials".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecuritySchemeRef {
    pub name: String,
    pub kind: SecuritySchemeKind,
    pub scopes: Vec<String>,
}

/// One alternative of a security requirement list. Empty means anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityRequirement {
    pub schemes: Vec<SecuritySchemeRef>,
}

impl SecurityRequirement {
    pub fn is_anonymous(&self) -> bool {
        self.schemes.is_empty()
    }
}

/// Flattened, fully resolved view of one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointAnalysis {
    pub path: String,
    pub method: String,
    pub operation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub required_parameters: Vec<ParameterInfo>,
    pub optional_parameters: Vec<ParameterInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_response: Option<ResponseInfo>,
    pub error_responses: Vec<ResponseInfo>,
    pub security: Vec<SecurityRequirement>,
}

impl EndpointAnalysis {
    /// All parameters in declaration order.
    pub fn parameters_in_order(&self) -> Vec<&ParameterInfo> {
        let mut all: Vec<&ParameterInfo> = self
            .required_parameters
            .iter()
            .chain(self.optional_parameters.iter())
            .collect();
        all.sort_by_key(|p| p.position);
        all
    }

    pub fn path_parameters(&self) -> Vec<&ParameterInfo> {
        self.parameters_in_order()
            .into_iter()
            .filter(|p| p.location == ParameterLocation::Path)
            .collect()
    }

    pub fn has_optional_fields(&self) -> bool {
        !self.optional_parameters.is_empty()
            || self
                .request_body
                .as_ref()
                .is_some_and(|b| b.optional_fields().next().is_some())
    }

    /// True when at least one requirement exists and none is anonymous.
    pub fn requires_authentication(&self) -> bool {
        !self.security.is_empty() && !self.security.iter().any(SecurityRequirement::is_anonymous)
    }

    /// Distinct schemes across all requirements, first occurrence first.
    pub fn security_schemes(&self) -> Vec<&SecuritySchemeRef> {
        let mut seen: Vec<&SecuritySchemeRef> = Vec::new();
        for req in &self.security {
            for scheme in &req.schemes {
                if !seen.iter().any(|s| s.name == scheme.name) {
                    seen.push(scheme);
                }
            }
        }
        seen
    }

    /// Status expected on success; 200 when the document declares no numeric code.
    pub fn success_status(&self) -> u16 {
        self.success_response
            .as_ref()
            .and_then(|r| r.status_code)
            .unwrap_or(200)
    }

    pub fn has_error_status(&self, code: u16) -> bool {
        self.error_responses.iter().any(|r| r.status_code == Some(code))
    }

    pub fn has_error_class(&self) -> bool {
        self.error_responses
            .iter()
            .any(|r| r.status.eq_ignore_ascii_case("4XX"))
    }

    /// First declared code out of `preferred`, else `fallback`.
    pub fn error_status(&self, preferred: &[u16], fallback: u16) -> u16 {
        preferred
            .iter()
            .copied()
            .find(|code| self.has_error_status(*code))
            .unwrap_or(fallback)
    }
}
