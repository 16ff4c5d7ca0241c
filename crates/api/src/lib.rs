mod alarm;
mod day;
mod error;
mod holiday;
mod job_schedulers;
mod schedule;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::{
    start_readiness_job, start_readiness_listener, start_regeneration_job_scheduler,
};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;
use wakeup_scheduler_infra::SchedulerContext;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    alarm::configure_routes(cfg);
    day::configure_routes(cfg);
    holiday::configure_routes(cfg);
    schedule::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: SchedulerContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: SchedulerContext) {
        start_readiness_listener(context.clone());
        start_readiness_job(context.clone());
        start_regeneration_job_scheduler(context);
    }

    async fn configure_server(context: SchedulerContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
