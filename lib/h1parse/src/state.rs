/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use crate::UrlState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeadReason {
    /// The last message did not allow the connection to be reused.
    Closed,
    /// A parse error happened.
    Failed,
}

/// Grammar position of the parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    StartReqOrRes,
    ResOrRespH,
    StartRes,
    ResH,
    ResHT,
    ResHTT,
    ResHTTP,
    ResFirstHttpMajor,
    ResHttpMajor,
    ResFirstHttpMinor,
    ResHttpMinor,
    ResFirstStatusCode,
    ResStatusCode,
    ResStatus,
    ResLineAlmostDone,

    StartReq,
    ReqMethod,
    SpacesBeforeUrl,
    Url(UrlState),
    ReqHttpStart,
    ReqHttpH,
    ReqHttpHT,
    ReqHttpHTT,
    ReqHttpHTTP,
    ReqFirstHttpMajor,
    ReqHttpMajor,
    ReqFirstHttpMinor,
    ReqHttpMinor,
    ReqLineAlmostDone,

    HeaderFieldStart,
    HeaderField,
    HeaderValueStart,
    HeaderValue,
    HeaderValueLws,
    HeaderAlmostDone,

    ChunkSizeStart,
    ChunkSize,
    ChunkParameters,
    ChunkSizeAlmostDone,

    HeadersAlmostDone,
    HeadersDone,

    ChunkData,
    ChunkDataAlmostDone,
    ChunkDataDone,

    BodyIdentity,
    BodyIdentityEof,

    MessageDone,

    /// Everything after the current message belongs to another protocol.
    Upgraded,
    Dead(DeadReason),
}

impl State {
    /// Bytes consumed in these states count against the header size limit.
    pub(crate) fn is_header_state(&self) -> bool {
        !matches!(
            self,
            State::ChunkData
                | State::ChunkDataAlmostDone
                | State::ChunkDataDone
                | State::BodyIdentity
                | State::BodyIdentityEof
                | State::MessageDone
                | State::Upgraded
                | State::Dead(_)
        )
    }

    /// Whether this is a point between messages.
    pub(crate) fn is_start(&self) -> bool {
        matches!(
            self,
            State::StartReqOrRes | State::StartReq | State::StartRes
        )
    }
}
