//! Request handler traits and utilities.
//!
//! A handler turns a decoded request into a response synchronously. It has no
//! error channel of its own: application failures must already be expressed as
//! an HTTP error response.

use std::sync::Arc;

use crate::protocol::{Environment, Request, Response};

pub trait RequestHandler {
    fn process_request(&self, request: &Request, env: &Environment) -> Response;
}

impl<H: RequestHandler + ?Sized> RequestHandler for Arc<H> {
    fn process_request(&self, request: &Request, env: &Environment) -> Response {
        (**self).process_request(request, env)
    }
}

impl<H: RequestHandler + ?Sized> RequestHandler for &H {
    fn process_request(&self, request: &Request, env: &Environment) -> Response {
        (**self).process_request(request, env)
    }
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> RequestHandler for HandlerFn<F>
where
    F: Fn(&Request, &Environment) -> Response,
{
    fn process_request(&self, request: &Request, env: &Environment) -> Response {
        (self.f)(request, env)
    }
}

pub fn make_handler<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&Request, &Environment) -> Response,
{
    HandlerFn { f }
}
