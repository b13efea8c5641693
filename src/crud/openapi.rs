use serde_json::{json, Value};

use super::Resource;

/// OpenAPI fragment for a resource's five operations plus the module's schemas.
///
/// `schemas` must define `{ENTITY}`, `Create{ENTITY}` and `Update{ENTITY}`.
pub fn openapi<R: Resource>(schemas: Value) -> Value {
    let tag = R::ENTITY;
    let item = format!("#/components/schemas/{}", R::ENTITY);
    let create = format!("#/components/schemas/Create{}", R::ENTITY);
    let update = format!("#/components/schemas/Update{}", R::ENTITY);
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64", "minimum": 1 }
    });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": format!("List {}", R::COMPONENT),
                    "tags": [tag],
                    "responses": {
                        "200": {
                            "description": format!("All {}", R::COMPONENT),
                            "content": json_content(json!({
                                "type": "array",
                                "items": { "$ref": item }
                            }))
                        },
                        "500": error_response("Internal server error")
                    }
                },
                "post": {
                    "summary": format!("Create a {}", R::ENTITY),
                    "tags": [tag],
                    "requestBody": {
                        "required": true,
                        "content": json_content(json!({ "$ref": create }))
                    },
                    "responses": {
                        "201": {
                            "description": "Created",
                            "headers": {
                                "Location": { "schema": { "type": "string" } }
                            },
                            "content": json_content(json!({ "$ref": item }))
                        },
                        "400": error_response("Missing or invalid payload"),
                        "500": error_response("Internal server error")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": format!("Get a {} by id", R::ENTITY),
                    "tags": [tag],
                    "parameters": [id_param.clone()],
                    "responses": {
                        "200": {
                            "description": R::ENTITY,
                            "content": json_content(json!({ "$ref": item }))
                        },
                        "404": { "description": "Not found" },
                        "500": error_response("Internal server error")
                    }
                },
                "put": {
                    "summary": format!("Replace a {}", R::ENTITY),
                    "tags": [tag],
                    "parameters": [id_param.clone()],
                    "requestBody": {
                        "required": true,
                        "content": json_content(json!({ "$ref": update }))
                    },
                    "responses": {
                        "204": { "description": "Updated" },
                        "400": error_response("Missing payload, invalid payload or id mismatch"),
                        "404": { "description": "Not found" },
                        "500": error_response("Internal server error")
                    }
                },
                "delete": {
                    "summary": format!("Delete a {}", R::ENTITY),
                    "tags": [tag],
                    "parameters": [id_param],
                    "responses": {
                        "204": { "description": "Deleted" },
                        "400": error_response("Invalid id"),
                        "404": { "description": "Not found" },
                        "500": error_response("Internal server error")
                    }
                }
            }
        },
        "components": {
            "schemas": schemas
        }
    })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": json_content(json!({ "$ref": "#/components/schemas/ErrorResponse" }))
    })
}
