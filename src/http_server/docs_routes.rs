//! API documentation route
//!
//! Serves an OpenAPI 3 document at `/api-docs`. Request and record schemas
//! are generated from the declared travel record schema so the document
//! cannot drift from what the validator enforces.

use axum::{routing::get, Json, Router};
use serde_json::{json, Map, Value};

use crate::schema::{FieldDef, FieldRule, FieldType, Schema};

/// Documentation routes, mounted at root
pub fn docs_routes() -> Router {
    Router::new().route("/api-docs", get(docs_handler))
}

async fn docs_handler() -> Json<Value> {
    Json(openapi_document())
}

/// Builds the OpenAPI document for the record routes.
pub fn openapi_document() -> Value {
    let schema = Schema::travel_record();

    let input = object_schema(schema.fields(), true);
    let patch = object_schema(schema.fields(), false);

    let mut record = object_schema(schema.fields(), true);
    if let Some(props) = record["properties"].as_object_mut() {
        props.insert("id".into(), json!({ "type": "string", "format": "uuid" }));
        props.insert("createdAt".into(), json!({ "type": "string", "format": "date-time" }));
        props.insert("updatedAt".into(), json!({ "type": "string", "format": "date-time" }));
        props.insert("weather".into(), json!({ "type": "string" }));
    }
    if let Some(required) = record["required"].as_array_mut() {
        required.extend(["id", "createdAt", "updatedAt"].map(Value::from));
    }

    let id_param = json!({
        "name": "id", "in": "path", "required": true, "schema": { "type": "string" }
    });
    let error = |description: &str| {
        json!({
            "description": description,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
        })
    };
    let record_body = |description: &str| {
        json!({
            "description": description,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/TravelRecord" } } }
        })
    };

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Travel Records API",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/api/travel-records": {
                "get": {
                    "summary": "List travel records",
                    "responses": {
                        "200": {
                            "description": "All records in insertion order",
                            "content": { "application/json": { "schema": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/TravelRecord" }
                            } } }
                        }
                    }
                },
                "post": {
                    "summary": "Create a travel record",
                    "parameters": [{
                        "name": "weather", "in": "query", "required": false,
                        "schema": { "type": "boolean", "default": false }
                    }],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/TravelRecordInput" } } }
                    },
                    "responses": {
                        "201": record_body("Record created"),
                        "400": error("Validation failed"),
                        "502": error("Weather enrichment failed"),
                    }
                }
            },
            "/api/travel-records/{id}": {
                "get": {
                    "summary": "Get a travel record",
                    "parameters": [id_param.clone()],
                    "responses": {
                        "200": record_body("The record"),
                        "404": error("Record not found"),
                    }
                },
                "patch": {
                    "summary": "Update a travel record",
                    "parameters": [id_param.clone()],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/TravelRecordPatch" } } }
                    },
                    "responses": {
                        "200": record_body("Updated record"),
                        "400": error("Validation failed"),
                        "404": error("Record not found"),
                    }
                },
                "delete": {
                    "summary": "Delete a travel record",
                    "parameters": [id_param],
                    "responses": {
                        "204": { "description": "Record deleted" },
                        "404": error("Record not found"),
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "TravelRecordInput": input,
                "TravelRecordPatch": patch,
                "TravelRecord": record,
                "Error": {
                    "type": "object",
                    "required": ["error"],
                    "properties": {
                        "error": { "type": "string" },
                        "details": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "field": { "type": "string" },
                                    "message": { "type": "string" }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

fn object_schema(fields: &[FieldDef], with_required: bool) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for def in fields {
        properties.insert(def.name.to_string(), field_schema(def));
        if with_required && def.required {
            required.push(Value::from(def.name));
        }
    }

    let mut obj = json!({ "type": "object", "properties": properties });
    if with_required {
        obj["required"] = Value::Array(required);
    }
    obj
}

fn field_schema(def: &FieldDef) -> Value {
    let mut schema = json!({ "type": def.field_type.type_name() });
    match (def.field_type, def.rule) {
        (FieldType::String, Some(FieldRule::NonEmpty)) => {
            schema["minLength"] = json!(1);
        }
        (FieldType::Number, Some(FieldRule::Range { min, max })) => {
            schema["minimum"] = json!(min);
            schema["maximum"] = json!(max);
        }
        _ => {}
    }
    schema
}
