#![allow(dead_code)]

use std::{
    collections::HashMap,
    io::Cursor,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use image::{ImageBuffer, ImageFormat, Rgba};
use staffdir_core::{DirectoryError, Result, infra::http::RemoteFetcher};
use url::Url;

#[derive(Debug, Clone)]
pub enum StubResponse {
    Body(Vec<u8>),
    NoData,
    Status(u16),
}

/// Scripted [`RemoteFetcher`] that counts every call.
#[derive(Debug, Default)]
pub struct StubFetcher {
    responses: Mutex<HashMap<String, StubResponse>>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &Url, response: StubResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.as_str().to_string(), response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteFetcher for StubFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response =
            self.responses.lock().unwrap().get(url.as_str()).cloned();
        match response {
            Some(StubResponse::Body(bytes)) => Ok(bytes),
            Some(StubResponse::NoData) => {
                Err(DirectoryError::NoData { url: url.clone() })
            }
            Some(StubResponse::Status(status)) => {
                Err(DirectoryError::HttpStatus {
                    url: url.clone(),
                    status,
                })
            }
            None => Err(DirectoryError::HttpStatus {
                url: url.clone(),
                status: 404,
            }),
        }
    }
}

/// Fetcher that never completes.
#[derive(Debug, Default)]
pub struct HangingFetcher;

#[async_trait]
impl RemoteFetcher for HangingFetcher {
    async fn fetch(&self, _url: &Url) -> Result<Vec<u8>> {
        std::future::pending().await
    }
}

pub fn url(raw: &str) -> Url {
    Url::parse(raw).unwrap()
}

/// A small PNG, solid `color`.
pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let buffer = ImageBuffer::from_pixel(width, height, Rgba(color));
    let mut out = Cursor::new(Vec::new());
    buffer.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

pub const ONE_EMPLOYEE: &str = r#"{"employees":[{
    "full_name": "Brian Papa",
    "uuid": "E621E1F8-C36C-495A-93FC-0C247A3E6E5F",
    "phone_number": null,
    "email_address": "bpapa@icloud.com",
    "biography": null,
    "photo_url_small": null,
    "photo_url_large": null,
    "team": "iOS Engineering",
    "employee_type": "FULL_TIME"
}]}"#;
