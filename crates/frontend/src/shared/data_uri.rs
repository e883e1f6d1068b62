//! Data-URI как промежуточное транспортное представление файла.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// `data:<media_type>;base64,<payload>`
pub fn encode(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}

/// Отрезает префикс `data:<media_type>;base64,` и возвращает голый Base64.
///
/// Делится по первой запятой; `None`, если запятой нет.
pub fn strip_prefix(data_uri: &str) -> Option<&str> {
    data_uri.split_once(',').map(|(_, payload)| payload)
}
