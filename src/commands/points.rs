//! Point Commands

use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{decode_error, invoke, rejected};
use crate::error::SourceResult;
use crate::model::PointsApi;
use crate::models::{Destination, OfferGroup, Point};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct PointArgs<'a> {
    point: &'a Point,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

// ========================
// Commands
// ========================

/// `PointsApi` over Tauri's `invoke`
#[derive(Debug, Clone, Copy, Default)]
pub struct TauriPointsApi;

impl TauriPointsApi {
    async fn call(&self, cmd: &str, args: JsValue) -> SourceResult<JsValue> {
        invoke(cmd, args).await.map_err(|e| rejected(cmd, e))
    }
}

#[async_trait(?Send)]
impl PointsApi for TauriPointsApi {
    async fn list_points(&self) -> SourceResult<Vec<Point>> {
        let result = self.call("list_points", JsValue::NULL).await?;
        serde_wasm_bindgen::from_value(result).map_err(decode_error)
    }

    async fn list_destinations(&self) -> SourceResult<Vec<Destination>> {
        let result = self.call("list_destinations", JsValue::NULL).await?;
        serde_wasm_bindgen::from_value(result).map_err(decode_error)
    }

    async fn list_offers(&self) -> SourceResult<Vec<OfferGroup>> {
        let result = self.call("list_offers", JsValue::NULL).await?;
        serde_wasm_bindgen::from_value(result).map_err(decode_error)
    }

    async fn update_point(&self, point: &Point) -> SourceResult<Point> {
        let js_args = serde_wasm_bindgen::to_value(&PointArgs { point }).map_err(decode_error)?;
        let result = self.call("update_point", js_args).await?;
        serde_wasm_bindgen::from_value(result).map_err(decode_error)
    }

    async fn add_point(&self, point: &Point) -> SourceResult<Point> {
        let js_args = serde_wasm_bindgen::to_value(&PointArgs { point }).map_err(decode_error)?;
        let result = self.call("add_point", js_args).await?;
        serde_wasm_bindgen::from_value(result).map_err(decode_error)
    }

    async fn delete_point(&self, id: &str) -> SourceResult<()> {
        let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(decode_error)?;
        self.call("delete_point", js_args).await?;
        Ok(())
    }
}
