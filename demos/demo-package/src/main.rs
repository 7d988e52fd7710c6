//! # 依赖注入演示
//!
//! 演示从提供者函数构建容器、校验依赖图并注入应用结构体：
//! `Config -> Database -> Service -> App`。

use anyhow::Context;
use clap::Parser;
use di_impl::{DiContainer, DiContainerBuilder};
use di_macros::Injectable;
use infrastructure_common::ContainerConfig;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "di-demo")]
#[command(about = "依赖注入端到端演示")]
struct Args {
    /// 容器配置文件路径（TOML）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 数据库主机
    #[arg(long, default_value = "localhost")]
    host: String,

    /// 让数据库提供者失败，演示错误链
    #[arg(long)]
    fail_database: bool,
}

/// 数据库配置
#[derive(Debug, Clone)]
struct Config {
    host: String,
}

/// 数据库连接
#[derive(Debug, Clone)]
struct Database {
    url: String,
}

/// 业务服务
#[derive(Debug, Clone, Default)]
struct Service {
    url: String,
}

/// 应用
#[derive(Debug, Default, Injectable)]
struct App {
    service: Service,
    #[inject(skip)]
    requests: u64,
}

fn new_database(config: Config) -> Database {
    Database {
        url: format!("postgresql://{}", config.host),
    }
}

fn new_service(db: Database) -> Service {
    Service { url: db.url }
}

fn build_container(args: &Args, config: ContainerConfig) -> anyhow::Result<DiContainer> {
    let host = args.host.clone();
    let builder = DiContainerBuilder::new()
        .with_config(config)
        .provide_named("new_config", move || Config { host: host.clone() })
        .provide(new_service);

    let builder = if args.fail_database {
        builder.try_provide(|_: Config| Err::<Database, _>("connection refused"))
    } else {
        builder.provide(new_database)
    };

    builder.build().context("构建容器失败")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = ContainerConfig::load(args.config.as_deref()).context("加载容器配置失败")?;

    // RUST_LOG 优先，否则使用配置中的级别
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("启动依赖注入演示");
    let mut container = build_container(&args, config)?;
    info!("已注册 {} 个提供者", container.registry().len());

    let mut app = App::default();
    if let Err(e) = container.inject(&mut app) {
        error!("注入失败: {}", e);
        error!("根本原因: {}", e.root_cause());
        return Err(e).context("注入应用失败");
    }

    app.requests += 1;
    info!(url = %app.service.url, requests = app.requests, "应用已就绪");
    println!("service connected to {}", app.service.url);
    Ok(())
}
