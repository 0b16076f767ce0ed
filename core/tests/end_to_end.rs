use autodoc_core::{build_document, generate_artifacts, GeneratorConfig, Ir};
use pretty_assertions::assert_eq;
use serde_json::json;

const IR_JSON: &str = r#"
{
  "models": [
    {
      "name": "User",
      "fields": [
        { "name": "id", "required": true, "typeRef": { "base": "int", "args": [] } },
        { "name": "name", "required": false, "typeRef": { "base": "String", "args": [] } }
      ]
    },
    {
      "name": "Role",
      "isEnum": true,
      "fields": [
        { "name": "ADMIN", "typeRef": { "base": "", "args": [] } },
        { "name": "USER", "typeRef": { "base": "", "args": [] } }
      ]
    }
  ],
  "endpoints": [
    {
      "path": "/api/v1/users",
      "method": "GET",
      "responseType": { "base": "List", "args": [{ "base": "User", "args": [] }] },
      "controllerName": "UserController",
      "dependencies": [
        { "name": "userService", "type": "UserService", "injectionType": "constructor" }
      ]
    }
  ]
}
"#;

#[test]
fn test_end_to_end_document() {
    let ir = Ir::from_json(IR_JSON).unwrap();
    let doc = build_document(&ir, &GeneratorConfig::default());
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(
        value["components"]["schemas"]["User"],
        json!({
            "type": "object",
            "properties": { "id": { "type": "integer" }, "name": { "type": "string" } },
            "required": ["id"]
        })
    );
    assert_eq!(
        value["components"]["schemas"]["Role"],
        json!({ "type": "string", "enum": ["ADMIN", "USER"] })
    );
    assert_eq!(
        value["paths"]["/api/v1/users"]["get"]["responses"]["200"]["content"]["application/json"]
            ["schema"],
        json!({ "type": "array", "items": { "$ref": "#/components/schemas/User" } })
    );
}

#[test]
fn test_end_to_end_yaml_is_reproducible() {
    let ir = Ir::from_json(IR_JSON).unwrap();
    let config = GeneratorConfig::default();
    let runs: Vec<String> = (0..10)
        .map(|_| build_document(&ir, &config).to_yaml().unwrap())
        .collect();
    assert!(runs.windows(2).all(|w| w[0] == w[1]));

    let expected = r#"openapi: 3.0.0
info:
  title: API
  version: 1.0.0
servers:
- url: https://api.example.com
paths:
  /api/v1/users:
    get:
      responses:
        '200':
          description: Successful Response
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: '#/components/schemas/User'
components:
  schemas:
    Role:
      type: string
      enum:
      - ADMIN
      - USER
    User:
      type: object
      properties:
        id:
          type: integer
        name:
          type: string
      required:
      - id
"#;
    assert_eq!(runs[0], expected);
}

#[test]
fn test_end_to_end_artifacts() {
    let ir = Ir::from_json(IR_JSON).unwrap();
    let artifacts = generate_artifacts(&ir, &GeneratorConfig::default()).unwrap();

    // A single endpoint is its own common prefix, so it lands in the fallback group
    assert!(artifacts
        .endpoint_table
        .contains("| Default | GET | `/api/v1/users` | - | - |"));
    assert!(artifacts.model_reference.contains("### Role"));
    assert!(artifacts.model_reference.contains("| id | int | yes | - |"));
    assert!(artifacts.endpoint_map.contains("subgraph group_Default"));
    assert!(artifacts
        .dependency_diagram
        .contains("ctrl_UserController -->|constructor| svc_UserService"));
}

#[test]
fn test_envelope_overlay_carries_payload() {
    let ir = Ir::from_json(
        r#"{
          "models": [
            {"name": "User", "fields": [{"name": "id", "typeRef": {"base": "Long"}}]},
            {"name": "ApiResponse", "fields": [
              {"name": "code", "typeRef": {"base": "int"}},
              {"name": "data", "typeRef": {"base": "T"}}
            ]}
          ],
          "endpoints": [
            {"path": "/users/{id}", "method": "GET",
             "responseType": {"base": "ApiResponse", "args": [{"base": "User"}]}}
          ]
        }"#,
    )
    .unwrap();
    let value = serde_json::to_value(build_document(&ir, &GeneratorConfig::default())).unwrap();

    // The type parameter is unknown to the resolver, so the wrapper alone types it as string
    assert_eq!(
        value["components"]["schemas"]["ApiResponse"]["properties"]["data"],
        json!({ "type": "string" })
    );
    assert_eq!(
        value["paths"]["/users/{id}"]["get"]["responses"]["200"]["content"]["application/json"]
            ["schema"],
        json!({
            "allOf": [
                { "$ref": "#/components/schemas/ApiResponse" },
                { "properties": { "data": { "$ref": "#/components/schemas/User" } } }
            ]
        })
    );
}
