//! Campus workspace root.
//!
//! The services live in `backend/`; the shared trust protocol lives in
//! `backend/libs/`. This root crate exists to host the cross-service
//! integration tests in `tests/`.
