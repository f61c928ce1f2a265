//! HTTP application layer.
//!
//! - `usecase/`: validated operations over the repositories, publishing events
//! - `controllers/`: HTTP handlers (one file per resource family)
//! - `dto.rs`: request/response DTOs and their OpenAPI schemas
//! - `validator.rs`: presence and length rules for request DTOs
//! - `errors.rs`: consistent error responses
//! - `extract.rs`: body/query extractors that reject with `ApiError`

pub mod controllers;
pub mod dto;
pub mod errors;
pub mod extract;
pub mod usecase;
pub mod validator;
