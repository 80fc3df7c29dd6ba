//! JSON-lines request handling.
//!
//! # Responsibility
//! - Decode one request per line and run it against the store.
//! - Map store errors to stable response codes.
//!
//! # Invariants
//! - Every input line produces exactly one response line.
//! - Malformed input never stops the session.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sketchpad_core::{
    ShapeId, ShapeInput, ShapePatch, ShapeStore, SnapshotDir, SnapshotFormat, StoreError,
};

/// One client request, discriminated by `op`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Request {
    List,
    Get {
        id: ShapeId,
    },
    Add {
        shape: ShapeInput,
    },
    Copy {
        id: ShapeId,
    },
    Update {
        id: ShapeId,
        #[serde(default)]
        patch: ShapePatch,
    },
    Delete {
        id: ShapeId,
    },
    DeleteAll,
    Undo,
    Redo,
    Save {
        file_name: String,
        extension: String,
    },
    Load {
        file_name: String,
        extension: String,
    },
}

/// Error payload of a failed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Response {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

impl Response {
    fn success(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    fn failure(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(ErrorBody {
                code,
                message: message.into(),
            }),
        }
    }
}

impl From<StoreError> for Response {
    fn from(value: StoreError) -> Self {
        let code = match &value {
            StoreError::NotFound(_) => "not_found",
            StoreError::UnknownShapeType(_) => "unknown_shape_type",
            StoreError::NothingToUndo => "nothing_to_undo",
            StoreError::NothingToRedo => "nothing_to_redo",
            StoreError::IdSpaceExhausted { .. } => "id_space_exhausted",
            StoreError::Snapshot(_) => "snapshot",
        };
        Self::failure(code, value.to_string())
    }
}

/// Parses and executes one input line.
pub(crate) fn handle_line(store: &mut ShapeStore, dir: &SnapshotDir, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(store, dir, request),
        Err(err) => {
            warn!("event=request_parse module=cli status=error error={err}");
            Response::failure("bad_request", err.to_string())
        }
    }
}

/// Executes one decoded request.
fn handle(store: &mut ShapeStore, dir: &SnapshotDir, request: Request) -> Response {
    match execute(store, dir, request) {
        Ok(data) => Response::success(data),
        Err(RequestError::Store(err)) => err.into(),
        Err(RequestError::Encode(err)) => Response::failure("internal", err.to_string()),
    }
}

enum RequestError {
    Store(StoreError),
    Encode(serde_json::Error),
}

impl From<StoreError> for RequestError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

fn execute(
    store: &mut ShapeStore,
    dir: &SnapshotDir,
    request: Request,
) -> Result<Value, RequestError> {
    let data = match request {
        Request::List => serde_json::to_value(store.get_all())?,
        Request::Get { id } => serde_json::to_value(store.get_shape(id)?)?,
        Request::Add { shape } => serde_json::to_value(store.add_new_shape(&shape)?)?,
        Request::Copy { id } => serde_json::to_value(store.add_copy(id)?)?,
        Request::Update { id, patch } => serde_json::to_value(store.update_shape(id, &patch)?)?,
        Request::Delete { id } => json!({ "deleted": store.delete_shape(id) }),
        Request::DeleteAll => {
            store.delete_all();
            json!({})
        }
        Request::Undo => serde_json::to_value(store.undo()?)?,
        Request::Redo => serde_json::to_value(store.redo()?)?,
        Request::Save {
            file_name,
            extension,
        } => {
            let format = SnapshotFormat::from_extension(&extension).map_err(StoreError::from)?;
            let path = store.save_snapshot(dir, &file_name, format)?;
            json!({ "path": path.display().to_string() })
        }
        Request::Load {
            file_name,
            extension,
        } => {
            let format = SnapshotFormat::from_extension(&extension).map_err(StoreError::from)?;
            serde_json::to_value(store.load_snapshot(dir, &file_name, format)?)?
        }
    };
    Ok(data)
}
