//! u601 Generate Document - Model (чтение файла и API)

use std::future::Future;

use contracts::usecases::u601_generate_document::{
    GenerateErrorBody, GenerateRequest, GenerateResponse,
};
use gloo_net::http::Request;
use wasm_bindgen_futures::JsFuture;

use super::error::GenerateError;
use crate::shared::data_uri;

/// Файл, выбранный пользователем
pub trait FileSource: Clone + 'static {
    fn name(&self) -> String;

    /// Объявленный MIME-тип (как его сообщает платформа, без проверки содержимого)
    fn media_type(&self) -> String;

    /// Прочитать файл целиком в data-URI
    fn read_data_uri(&self) -> impl Future<Output = Result<String, GenerateError>>;
}

/// Транспорт до сервиса генерации
pub trait GenerationClient {
    fn post(
        &self,
        request: GenerateRequest,
    ) -> impl Future<Output = Result<RawResponse, GenerateError>>;
}

/// Ответ сервиса до интерпретации
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Результат генерации: превью и ссылка на скачивание
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Доверенная разметка от сервиса
    pub html_preview: String,
    pub download_url: Option<String>,
}

impl GenerationResult {
    /// `None`, если сервис не прислал превью: карточка результата не показывается
    pub fn from_response(response: GenerateResponse) -> Option<Self> {
        let html_preview = response.html_preview.filter(|h| !h.is_empty())?;
        Some(Self {
            html_preview,
            download_url: response.download_url.filter(|u| !u.is_empty()),
        })
    }
}

/// Прочитать файл и собрать тело запроса (голый Base64 без префикса data-URI)
pub async fn build_request<F: FileSource>(file: &F) -> Result<GenerateRequest, GenerateError> {
    let data_uri = file.read_data_uri().await?;
    let payload = data_uri::strip_prefix(&data_uri).ok_or_else(GenerateError::read_failed)?;
    Ok(GenerateRequest::new(payload))
}

/// Тело разбирается как JSON при любом статусе.
///
/// 2xx с валидным JSON никогда не даёт ошибку: недостающие поля означают
/// пустой результат.
pub fn interpret_response(raw: RawResponse) -> Result<Option<GenerationResult>, GenerateError> {
    let value: serde_json::Value = serde_json::from_str(&raw.body)
        .map_err(|e| GenerateError::Network(format!("Failed to parse response: {}", e)))?;

    if !raw.ok() {
        let body: GenerateErrorBody = serde_json::from_value(value).unwrap_or_default();
        return Err(GenerateError::from_server_body(body));
    }

    let data: GenerateResponse = serde_json::from_value(value).unwrap_or_default();
    Ok(GenerationResult::from_response(data))
}

/// Файл из `<input type="file">`
#[derive(Debug, Clone)]
pub struct BrowserFile {
    file: web_sys::File,
}

impl BrowserFile {
    pub fn new(file: web_sys::File) -> Self {
        Self { file }
    }
}

impl FileSource for BrowserFile {
    fn name(&self) -> String {
        self.file.name()
    }

    fn media_type(&self) -> String {
        self.file.type_()
    }

    async fn read_data_uri(&self) -> Result<String, GenerateError> {
        let array_buffer = JsFuture::from(self.file.array_buffer())
            .await
            .map_err(|e| {
                log::error!("Failed to read local file: {:?}", e);
                GenerateError::read_failed()
            })?;

        let uint8_array = js_sys::Uint8Array::new(&array_buffer);
        let bytes = uint8_array.to_vec();

        Ok(data_uri::encode(&self.media_type(), &bytes))
    }
}

/// Запрос в том виде, в каком он уходит в сеть
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

/// HTTP-клиент сервиса генерации (API Gateway)
#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    url: String,
}

impl HttpGenerationClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn outbound(&self, request: GenerateRequest) -> OutboundRequest {
        OutboundRequest {
            method: "POST",
            url: self.url.clone(),
            headers: vec![("Content-Type", GenerateRequest::CONTENT_TYPE)],
            body: request.into_body(),
        }
    }
}

impl GenerationClient for HttpGenerationClient {
    async fn post(&self, request: GenerateRequest) -> Result<RawResponse, GenerateError> {
        let outbound = self.outbound(request);
        log::debug!("{} {}", outbound.method, outbound.url);

        let builder = outbound
            .headers
            .iter()
            .fold(Request::post(&outbound.url), |builder, (name, value)| {
                builder.header(name, value)
            });
        let response = builder
            .body(outbound.body)
            .map_err(|e| GenerateError::Unexpected(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(|e| GenerateError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::Network(format!("Failed to read response: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}
