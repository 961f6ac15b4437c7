//! AWS Lambda handler for running a single client's claiming analysis
//!
//! Accepts one client record as JSON and returns the analysis shaped by the
//! client's type (individual, divorced, widowed, or household) along with the
//! flat summary row advisors see in batch output.
//!
//! Deployed behind an API Gateway HTTP API (payload format 2.0).

use aws_lambda_events::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use aws_lambda_events::encodings::Body;
use aws_lambda_events::http::{HeaderMap, HeaderValue};
use chrono::NaiveDate;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use ss_optimizer::person::ClientRecord;
use ss_optimizer::strategy::{DisabilityCalculator, SsdiComparison};
use ss_optimizer::{
    AnalysisConfig, AnalysisRunner, AnalysisSummary, PersonAnalysis, PersonBenefitProfile,
};

/// Input for one analysis: a full client record, plus run-level overrides.
/// The record's own `longevity_age` and `inflation_rate` columns override the
/// run defaults exactly as they do in batch mode.
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    #[serde(flatten)]
    pub record: ClientRecord,

    /// Valuation date override (default: today)
    #[serde(default)]
    pub valuation_date: Option<NaiveDate>,

    /// Also run the SSDI standard-vs-suspension comparison on the record's
    /// birth date and PIA
    #[serde(default)]
    pub include_ssdi: bool,
}

/// Output from one analysis
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub client_id: String,
    pub valuation_date: NaiveDate,
    pub longevity_age: u32,
    pub inflation_rate: f64,
    pub summary: AnalysisSummary,
    pub analysis: PersonAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssdi: Option<SsdiComparison>,
    pub execution_time_ms: u64,
}

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    headers
}

fn error_response(status: i64, message: &str) -> ApiGatewayV2httpResponse {
    let mut headers = cors_headers();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    ApiGatewayV2httpResponse {
        status_code: status,
        headers,
        body: Some(Body::Text(format!(r#"{{"error":"{}"}}"#, message))),
        ..Default::default()
    }
}

fn json_response(response: &AnalysisResponse) -> ApiGatewayV2httpResponse {
    let mut headers = cors_headers();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    ApiGatewayV2httpResponse {
        status_code: 200,
        headers,
        body: Some(Body::Text(
            serde_json::to_string(response).expect("response serialization failed"),
        )),
        ..Default::default()
    }
}

/// Lambda handler function
async fn handler(
    event: LambdaEvent<ApiGatewayV2httpRequest>,
) -> Result<ApiGatewayV2httpResponse, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.payload.request_context.http.method.as_str() == "OPTIONS" {
        return Ok(ApiGatewayV2httpResponse {
            status_code: 200,
            headers: cors_headers(),
            body: None,
            ..Default::default()
        });
    }

    // Parse request body
    let body_str = event.payload.body.unwrap_or_else(|| "{}".to_string());

    let request: AnalysisRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let mut config = AnalysisConfig::from_env();
    if let Some(date) = request.valuation_date {
        config.valuation_date = date;
    }
    let longevity_age = request.record.longevity_age.unwrap_or(config.longevity_age);
    let inflation_rate = request
        .record
        .inflation_rate
        .unwrap_or(config.inflation_rate);

    let runner = AnalysisRunner::with_config(config);
    let analysis = runner.run(&request.record);
    let summary = runner.summarize_analysis(&request.record, &analysis);

    let ssdi = request.include_ssdi.then(|| {
        DisabilityCalculator::at_valuation_date(
            PersonBenefitProfile::new(request.record.birth_date, request.record.pia),
            config.valuation_date,
        )
        .ssdi_comparison(inflation_rate, longevity_age)
    });

    let response = AnalysisResponse {
        client_id: request.record.id.clone(),
        valuation_date: config.valuation_date,
        longevity_age,
        inflation_rate,
        summary,
        analysis,
        ssdi,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
