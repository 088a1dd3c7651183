use serde::Deserialize;

use crate::{AnalysisReply, FailureKind, TransportFault};

/// JSON body of `POST /analyze`.
///
/// `success` defaults to false: the service answers validation errors with a
/// bare `{"error": ...}` and a 4xx/5xx status.
#[derive(Debug, Deserialize)]
struct AnalyzePayload {
    #[serde(default)]
    success: bool,
    table_html: Option<String>,
    download_url: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

/// Maps a status code and raw body onto the reply union.
///
/// Any status may carry `{success: false, error}`, which is reported as a
/// logical failure. A success payload is only honored on 2xx. Everything else
/// is a transport fault.
pub fn decode_analysis_reply(status: u16, body: &[u8]) -> Result<AnalysisReply, TransportFault> {
    let ok_status = (200..300).contains(&status);
    let payload: AnalyzePayload = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(err) => {
            let kind = if ok_status {
                FailureKind::MalformedBody
            } else {
                FailureKind::HttpStatus(status)
            };
            return Err(TransportFault::new(kind, err.to_string()));
        }
    };

    match payload {
        AnalyzePayload {
            success: true,
            table_html: Some(table_html),
            download_url: Some(download_url),
            message: Some(message),
            ..
        } if ok_status => Ok(AnalysisReply::Success {
            table_html,
            download_url,
            message,
        }),
        AnalyzePayload {
            success: false,
            error: Some(error),
            ..
        } => Ok(AnalysisReply::Failure { error }),
        _ if !ok_status => Err(TransportFault::new(
            FailureKind::HttpStatus(status),
            "response carries no error text",
        )),
        _ => Err(TransportFault::new(
            FailureKind::MalformedBody,
            "payload is neither a complete success nor a failure",
        )),
    }
}
