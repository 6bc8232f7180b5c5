use crate::{
    api::{deductions, loan, payroll},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let compute_limiter = build_limiter(config.rate_compute_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(compute_limiter) // rate limiting
            .service(
                web::scope("/deductions")
                    // /deductions/compute
                    .service(
                        web::resource("/compute").route(web::post().to(deductions::compute)),
                    )
                    // /deductions/config
                    .service(
                        web::resource("/config").route(web::get().to(deductions::get_config)),
                    )
                    // /deductions/tds
                    .service(web::resource("/tds").route(web::post().to(deductions::compute_tds))),
            )
            .service(
                web::scope("/loans")
                    // /loans/emi
                    .service(web::resource("/emi").route(web::post().to(loan::emi_quote)))
                    // /loans/eligibility
                    .service(
                        web::resource("/eligibility").route(web::post().to(loan::eligibility)),
                    )
                    // /loans/apply
                    .service(web::resource("/apply").route(web::post().to(loan::apply))),
            )
            .service(
                web::scope("/payroll")
                    // /payroll/assemble
                    .service(
                        web::resource("/assemble").route(web::post().to(payroll::assemble_run)),
                    ),
            ),
    );
}
