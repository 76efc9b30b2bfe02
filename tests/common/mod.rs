#![allow(dead_code)]

use oas_gherkin::spec::{load_document_from_str, SpecFormat};
use oas_gherkin::{ApiDocument, GeneratorConfig, ScenarioService};
use std::path::{Path, PathBuf};

/// Inventory API: a query-driven listing, an authenticated create with a
/// body, and an authenticated lookup by identifier.
pub const INVENTORY_SPEC: &str = r#"openapi: 3.1.0
info:
  title: Inventory API
  version: "1.2.0"
security:
  - ApiKey: []
components:
  securitySchemes:
    ApiKey:
      type: apiKey
      in: header
      name: X-API-Key
  schemas:
    Item:
      type: object
      required: [id, name]
      properties:
        id: { type: string, readOnly: true }
        name: { type: string, minLength: 1, maxLength: 64 }
        price: { type: number, minimum: 0 }
        tags:
          type: array
          items: { type: string }
          maxItems: 5
paths:
  /items:
    get:
      operationId: listItems
      summary: List items
      tags: [items]
      security: []
      parameters:
        - { name: category, in: query, required: true, schema: { type: string } }
        - { name: page, in: query, required: true, schema: { type: integer, minimum: 1 } }
        - { name: limit, in: query, required: false, schema: { type: integer, minimum: 1, maximum: 100 } }
      responses:
        "200":
          description: items
          content:
            application/json:
              schema:
                type: array
                items: { $ref: '#/components/schemas/Item' }
        "400": { description: bad request }
    post:
      operationId: createItem
      summary: Create an item
      tags: [items]
      requestBody:
        required: true
        content:
          application/json:
            schema: { $ref: '#/components/schemas/Item' }
      responses:
        "201":
          description: created
          content:
            application/json:
              schema: { $ref: '#/components/schemas/Item' }
        "400": { description: invalid }
        "401": { description: unauthorized }
  /items/{id}:
    get:
      operationId: getItem
      tags: [items]
      parameters:
        - { name: id, in: path, required: true, schema: { type: string } }
      responses:
        "200":
          description: found
          content:
            application/json:
              schema: { $ref: '#/components/schemas/Item' }
        "404": { description: not found }
  /health:
    get:
      responses:
        "200": { description: ok }
"#;

/// Two schemas referencing each other.
pub const CYCLIC_SPEC: &str = r#"openapi: 3.1.0
info:
  title: Cyclic
  version: "1.0"
components:
  schemas:
    A:
      type: object
      properties:
        b: { $ref: '#/components/schemas/B' }
    B:
      type: object
      properties:
        a: { $ref: '#/components/schemas/A' }
paths:
  /a:
    post:
      requestBody:
        content:
          application/json:
            schema: { $ref: '#/components/schemas/A' }
      responses:
        "200": { description: ok }
"#;

pub fn document(yaml: &str) -> ApiDocument {
    load_document_from_str(yaml, SpecFormat::Yaml).unwrap()
}

pub fn inventory_service() -> ScenarioService {
    ScenarioService::from_document(document(INVENTORY_SPEC), GeneratorConfig::default())
}

/// Write `contents` to `name` inside `dir`.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
