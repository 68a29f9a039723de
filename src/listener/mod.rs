// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! WebSocket front end.
//!
//! Remote clients (typically a browser extension) ask how many tabs match a query, or fetch
//! and consume them. Every request is answered from the same session the console drives.
//! Given a certificate and key the listener speaks `wss://` instead of plain `ws://`.

mod server;
mod tls;
mod types;

pub use server::{
    answer, bind, parse_request, router, serve, ListenerError, ProtocolError, WS_PATH,
};
pub use tls::{load_tls, TlsFiles};
pub use types::{MessageIn, MessageOut, RequestKind, ResponseData};
