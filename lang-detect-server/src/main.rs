use std::path::PathBuf;

use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use clap::Parser;
use log::{error, info};
use serde::Deserialize;

use lang_detect_core::{LanguageDetector, ModelKind};

/// HTTP front-end for the n-gram language detector
#[derive(Parser, Debug)]
#[command(name = "lang-detect-server", version, about)]
struct Args {
	/// Directory holding the `model-<kind>.bin` files
	#[arg(long, env = "LANG_DETECT_MODEL_DIR", default_value = "./models")]
	model_dir: PathBuf,

	#[arg(long, env = "LANG_DETECT_MODEL", default_value_t = ModelKind::Tc)]
	model: ModelKind,

	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(long, default_value_t = 5000)]
	port: u16,
}

/// Query parameters of the `/v1/detect` endpoint
#[derive(Deserialize)]
struct DetectParams {
	text: Option<String>,
	distance: Option<bool>,
}

/// HTTP GET endpoint `/v1/detect`
///
/// Returns the detected language name, followed by a tab and the raw distance
/// when `distance=true`.
#[get("/v1/detect")]
async fn get_detect(detector: web::Data<LanguageDetector>, query: web::Query<DetectParams>) -> impl Responder {
	let text = match &query.text {
		Some(s) if !s.trim().is_empty() => s,
		_ => return HttpResponse::BadRequest().body("Missing or empty text"),
	};

	match detector.detect_with_distance(text) {
		Ok((name, d)) if query.distance.unwrap_or(false) => HttpResponse::Ok().body(format!("{name}\t{d}")),
		Ok((name, _)) => HttpResponse::Ok().body(name.to_owned()),
		Err(e) => {
			error!("detection failed: {e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
	}
}

/// HTTP GET endpoint `/v1/languages`
///
/// Lists the loaded profile names, one per line, in tie-break order.
#[get("/v1/languages")]
async fn get_languages(detector: web::Data<LanguageDetector>) -> impl Responder {
	HttpResponse::Ok().body(detector.languages().join("\n"))
}

/// Main entry point for the server.
///
/// The model is loaded before binding: a missing or corrupt model stops the
/// process instead of serving an empty detector. The detector is read-only,
/// so workers share it without a lock.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let detector = LanguageDetector::open(&args.model_dir, args.model).map_err(std::io::Error::other)?;
	info!("serving {} languages on {}:{}", detector.languages().len(), args.host, args.port);
	let detector = web::Data::new(detector);

	HttpServer::new(move || {
		App::new()
			.app_data(detector.clone())
			.service(get_detect)
			.service(get_languages)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use actix_web::http::StatusCode;
	use actix_web::test;

	use lang_detect_core::{Profile, ProfileSet};

	use super::*;

	fn detector() -> web::Data<LanguageDetector> {
		let en = Profile::from_ranks("en", Profile::from_text("the quick brown fox the quick").ngrams().clone());
		let fr = Profile::from_ranks("fr", Profile::from_text("le renard brun le renard").ngrams().clone());
		web::Data::new(LanguageDetector::new(ProfileSet::new(vec![en, fr])))
	}

	#[actix_web::test]
	async fn detects_language() {
		let app = test::init_service(App::new().app_data(detector()).service(get_detect)).await;
		let req = test::TestRequest::get().uri("/v1/detect?text=the%20quick%20fox").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "en");
	}

	#[actix_web::test]
	async fn reports_distance_on_request() {
		let app = test::init_service(App::new().app_data(detector()).service(get_detect)).await;
		let req = test::TestRequest::get().uri("/v1/detect?text=le%20renard&distance=true").to_request();
		let body = test::call_and_read_body(&app, req).await;
		let body = std::str::from_utf8(&body).unwrap();
		assert!(body.starts_with("fr\t"), "{body}");
	}

	#[actix_web::test]
	async fn empty_text_is_a_bad_request() {
		let app = test::init_service(App::new().app_data(detector()).service(get_detect)).await;
		let req = test::TestRequest::get().uri("/v1/detect?text=%20").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn empty_model_is_a_server_error() {
		let empty = web::Data::new(LanguageDetector::new(ProfileSet::default()));
		let app = test::init_service(App::new().app_data(empty).service(get_detect)).await;
		let req = test::TestRequest::get().uri("/v1/detect?text=hello").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[actix_web::test]
	async fn lists_languages_in_order() {
		let app = test::init_service(App::new().app_data(detector()).service(get_languages)).await;
		let req = test::TestRequest::get().uri("/v1/languages").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "en\nfr");
	}
}
