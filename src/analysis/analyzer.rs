use super::schema::{constraints_for, flatten_schema, object_fields, schema_name};
use super::types::{
    EndpointAnalysis, ParameterInfo, RequestBodyInfo, ResponseInfo, SecurityRequirement,
    SecuritySchemeKind, SecuritySchemeRef,
};
use crate::error::Result;
use crate::resolver::ReferenceResolver;
use crate::spec::{ApiDocument, Endpoint, ParameterLocation};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// Builds [`EndpointAnalysis`] values, expanding references through the
/// owned [`ReferenceResolver`].
#[derive(Debug, Clone, Default)]
pub struct EndpointAnalyzer {
    resolver: ReferenceResolver,
}

impl EndpointAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolver(&self) -> &ReferenceResolver {
        &self.resolver
    }

    /// Analyze one endpoint of `document`.
    ///
    /// # Errors
    ///
    /// Resolution errors (`reference_not_found`, `circular_reference`) are
    /// returned unchanged.
    pub fn analyze(&mut self, endpoint: &Endpoint, document: &ApiDocument) -> Result<EndpointAnalysis> {
        let raw = document.raw();

        let parameters = self.collect_parameters(endpoint, raw)?;
        let (required_parameters, optional_parameters): (Vec<_>, Vec<_>) =
            parameters.into_iter().partition(|p| p.required);

        let request_body = match &endpoint.request_body {
            Some(body) => self.analyze_request_body(body, raw)?,
            None => None,
        };

        let (success_response, error_responses) = self.analyze_responses(endpoint, raw)?;

        let requirements = match &endpoint.security {
            Some(own) => own.clone(),
            None => document.default_security().cloned().unwrap_or_default(),
        };
        let security = self.analyze_security(&requirements, raw)?;

        debug!(
            operation_id = %endpoint.operation_id,
            required = required_parameters.len(),
            optional = optional_parameters.len(),
            has_body = request_body.is_some(),
            errors = error_responses.len(),
            "analyzed endpoint"
        );

        Ok(EndpointAnalysis {
            path: endpoint.path.clone(),
            method: endpoint.method.to_string(),
            operation_id: endpoint.operation_id.clone(),
            summary: endpoint.summary.clone(),
            tags: endpoint.tags.clone(),
            required_parameters,
            optional_parameters,
            request_body,
            success_response,
            error_responses,
            security,
        })
    }

    /// Resolve and merge parameters; later declarations with the same
    /// name and location replace earlier ones in place.
    fn collect_parameters(&mut self, endpoint: &Endpoint, raw: &Value) -> Result<Vec<ParameterInfo>> {
        let mut out: Vec<ParameterInfo> = Vec::new();

        for param in &endpoint.parameters {
            let resolved = self.resolver.resolve_schema(param, raw)?;
            let Some(name) = resolved.get("name").and_then(Value::as_str) else {
                warn!(operation_id = %endpoint.operation_id, "parameter without a name ignored");
                continue;
            };
            let Some(location) = resolved
                .get("in")
                .and_then(Value::as_str)
                .and_then(|l| l.parse::<ParameterLocation>().ok())
            else {
                warn!(operation_id = %endpoint.operation_id, parameter = %name, "parameter with unknown location ignored");
                continue;
            };

            let schema = resolved
                .get("schema")
                .cloned()
                .or_else(|| first_media_schema(resolved.get("content")))
                .unwrap_or_else(|| json!({ "type": "string" }));
            let schema = flatten_schema(&schema);

            let required = location == ParameterLocation::Path
                || resolved.get("required").and_then(Value::as_bool).unwrap_or(false);

            let info = ParameterInfo {
                name: name.to_string(),
                location,
                required,
                description: resolved
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                constraints: constraints_for(&schema),
                schema,
                position: 0,
            };

            if let Some(existing) = out
                .iter_mut()
                .find(|p| p.name == info.name && p.location == info.location)
            {
                *existing = info;
            } else {
                out.push(info);
            }
        }

        for (position, param) in out.iter_mut().enumerate() {
            param.position = position;
        }
        Ok(out)
    }

    fn analyze_request_body(&mut self, body: &Value, raw: &Value) -> Result<Option<RequestBodyInfo>> {
        let resolved = self.resolver.resolve_schema(body, raw)?;
        let Some((content_type, media)) = pick_media(resolved.get("content")) else {
            return Ok(None);
        };

        let schema = media.get("schema").cloned().unwrap_or_else(|| json!({}));
        let name = schema_name(&schema);
        let flat = flatten_schema(&schema);

        Ok(Some(RequestBodyInfo {
            content_type,
            required: resolved.get("required").and_then(Value::as_bool).unwrap_or(false),
            fields: object_fields(&flat),
            schema: flat,
            schema_name: name,
        }))
    }

    fn analyze_responses(
        &mut self,
        endpoint: &Endpoint,
        raw: &Value,
    ) -> Result<(Option<ResponseInfo>, Vec<ResponseInfo>)> {
        let mut success_code: Option<(u16, &str, &Value)> = None;
        let mut success_class: Option<&Value> = None;
        let mut fallback: Option<&Value> = None;
        let mut errors: Vec<(u16, &str, &Value)> = Vec::new();
        let mut error_class: Option<&Value> = None;

        for (status, response) in &endpoint.responses {
            match status.parse::<u16>() {
                Ok(code @ 200..=299) => {
                    if success_code.map_or(true, |(best, _, _)| code < best) {
                        success_code = Some((code, status, response));
                    }
                }
                Ok(code @ 400..=499) => errors.push((code, status, response)),
                Ok(_) => {}
                Err(_) if status.eq_ignore_ascii_case("2XX") => success_class = Some(response),
                Err(_) if status.eq_ignore_ascii_case("4XX") => error_class = Some(response),
                Err(_) if status == "default" => fallback = Some(response),
                Err(_) => {}
            }
        }

        let success = if let Some((code, status, response)) = success_code {
            Some(self.response_info(status, Some(code), response, raw)?)
        } else if let Some(response) = success_class {
            Some(self.response_info("2XX", None, response, raw)?)
        } else if let Some(response) = fallback {
            Some(self.response_info("default", None, response, raw)?)
        } else {
            None
        };

        errors.sort_by_key(|(code, _, _)| *code);
        let mut error_responses = Vec::with_capacity(errors.len() + 1);
        for (code, status, response) in errors {
            error_responses.push(self.response_info(status, Some(code), response, raw)?);
        }
        if let Some(response) = error_class {
            error_responses.push(self.response_info("4XX", None, response, raw)?);
        }

        Ok((success, error_responses))
    }

    fn response_info(
        &mut self,
        status: &str,
        status_code: Option<u16>,
        response: &Value,
        raw: &Value,
    ) -> Result<ResponseInfo> {
        let resolved = self.resolver.resolve_schema(response, raw)?;
        let media = pick_media(resolved.get("content"));
        let schema = media
            .as_ref()
            .and_then(|(_, m)| m.get("schema"))
            .map(|s| (schema_name(s), flatten_schema(s)));

        Ok(ResponseInfo {
            status: status.to_string(),
            status_code,
            description: resolved
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            content_type: media.map(|(ct, _)| ct),
            schema_name: schema.as_ref().and_then(|(name, _)| name.clone()),
            schema: schema.map(|(_, s)| s),
        })
    }

    fn analyze_security(&mut self, requirements: &[Value], raw: &Value) -> Result<Vec<SecurityRequirement>> {
        let mut out = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let Some(entries) = requirement.as_object() else {
                continue;
            };
            let mut schemes = Vec::with_capacity(entries.len());
            for (name, scopes) in entries {
                let escaped = name.replace('~', "~0").replace('/', "~1");
                let reference = format!(
                    "#/components/securitySchemes/{}",
                    urlencoding::encode(&escaped)
                );
                let definition = self.resolver.resolve(&reference, raw)?;
                schemes.push(SecuritySchemeRef {
                    name: name.clone(),
                    kind: scheme_kind(&definition),
                    scopes: scopes
                        .as_array()
                        .map(|s| s.iter().filter_map(Value::as_str).map(str::to_string).collect())
                        .unwrap_or_default(),
                });
            }
            out.push(SecurityRequirement { schemes });
        }
        Ok(out)
    }
}

fn scheme_kind(definition: &Value) -> SecuritySchemeKind {
    let field = |key: &str| definition.get(key).and_then(Value::as_str).unwrap_or_default();
    match field("type") {
        "apiKey" => SecuritySchemeKind::ApiKey {
            location: field("in").to_string(),
            parameter: field("name").to_string(),
        },
        "http" => SecuritySchemeKind::Http {
            scheme: field("scheme").to_lowercase(),
            bearer_format: definition
                .get("bearerFormat")
                .and_then(Value::as_str)
                .map(str::to_string),
        },
        "oauth2" => SecuritySchemeKind::OAuth2,
        "openIdConnect" => SecuritySchemeKind::OpenIdConnect,
        "mutualTLS" => SecuritySchemeKind::MutualTls,
        _ => SecuritySchemeKind::Unknown,
    }
}

/// Media type entry to use: `application/json`, then any JSON flavour, then the first.
fn pick_media(content: Option<&Value>) -> Option<(String, Value)> {
    let map: &Map<String, Value> = content?.as_object()?;
    let chosen = map
        .get_key_value("application/json")
        .or_else(|| map.iter().find(|(ct, _)| ct.contains("json")))
        .or_else(|| map.iter().next())?;
    Some((chosen.0.clone(), chosen.1.clone()))
}

fn first_media_schema(content: Option<&Value>) -> Option<Value> {
    pick_media(content).and_then(|(_, media)| media.get("schema").cloned())
}
