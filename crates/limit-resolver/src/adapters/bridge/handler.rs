use serde::de::DeserializeOwned;

use crate::{
    core::{LimitResolver, RawLimitInput},
    error::{AppError, AppResult},
};

use super::protocol::*;

pub struct BridgeHandler {
    resolver: LimitResolver,
}

impl BridgeHandler {
    pub fn new(resolver: LimitResolver) -> Self {
        Self { resolver }
    }

    pub fn handle(&self, req: BridgeRequest) -> BridgeResponse<serde_json::Value> {
        if req.v != PROTOCOL_VERSION {
            return BridgeResponse::err(
                req.v,
                req.id,
                "INVALID_REQUEST",
                format!("unsupported protocol version: {}", req.v),
            );
        }

        let res = match req.cmd.as_str() {
            "resolve" => self.handle_resolve(&req.payload),
            "paginate" => self.handle_paginate(&req.payload),
            other => Err(AppError::InvalidRequest(format!("unknown cmd: {other}"))),
        };

        match res {
            Ok(data) => BridgeResponse::ok(req.v, req.id, data),
            Err(e) => {
                tracing::debug!(id = %req.id, cmd = %req.cmd, error = %e, "request failed");
                BridgeResponse::err(req.v, req.id, e.code(), e.to_string())
            }
        }
    }

    fn handle_resolve(&self, payload: &serde_json::Value) -> AppResult<serde_json::Value> {
        let p: ResolvePayload = if payload.is_null() {
            ResolvePayload::default()
        } else {
            parse_payload(payload)?
        };
        let raw = RawLimitInput::from(&p.limit);
        let resolution = self.resolver.resolve_detailed(&raw);
        if resolution.defaulted {
            tracing::debug!(input = ?raw, limit = %resolution.limit, "limit input unusable; defaulted");
        }
        Ok(serde_json::to_value(ResolveData {
            limit: resolution.limit,
            defaulted: resolution.defaulted,
        })?)
    }

    fn handle_paginate(&self, payload: &serde_json::Value) -> AppResult<serde_json::Value> {
        let p: PaginatePayload = parse_payload(payload)?;
        let limit = self.resolver.resolve(&p.limit);
        let page = limit.paginate(p.rows, p.offset);
        tracing::trace!(%limit, offset = p.offset, kept = page.rows.len(), truncated = page.truncated, "paginated");
        Ok(serde_json::to_value(page)?)
    }
}

fn parse_payload<T: DeserializeOwned>(payload: &serde_json::Value) -> AppResult<T> {
    serde_json::from_value(payload.clone()).map_err(|e| AppError::InvalidRequest(e.to_string()))
}
