//! HTTP 传输层
//!
//! 基于 `gloo-net` 的 fetch 实现，供核心库的 [`HttpClient`] 使用。

use gloo_net::http::{Method, RequestBuilder};
use storefront::error::{ApiError, Result};
use storefront::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm, RequestBody};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

fn js_err(e: JsValue) -> ApiError {
    ApiError::transport(format!("{:?}", e))
}

fn method(m: HttpMethod) -> Method {
    match m {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// 把结构化的 multipart 表单转换为浏览器 FormData
///
/// Content-Type 与 boundary 由浏览器根据 FormData 自动填写。
fn form_data(form: &MultipartForm) -> Result<FormData> {
    let data = FormData::new().map_err(js_err)?;
    for (name, value) in &form.fields {
        data.append_with_str(name, value).map_err(js_err)?;
    }

    for file in &form.files {
        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&file.content_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
        data.append_with_blob_and_filename(&file.field, &blob, &file.file_name)
            .map_err(js_err)?;
    }
    Ok(data)
}

/// fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let mut builder = RequestBuilder::new(&req.url).method(method(req.method));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(json) => builder.body(json),
            RequestBody::Form(pairs) => builder.body(RequestBody::encode_form(&pairs)),
            RequestBody::Multipart(form) => builder.body(form_data(&form)?),
        }
        .map_err(|e| ApiError::transport(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        Ok(HttpResponse {
            status: response.status(),
            body: response
                .text()
                .await
                .map_err(|e| ApiError::transport(e.to_string()))?,
        })
    }
}
