use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use leaf_doctor::{cli, client, config, diagnose, error, report, scanner};
use cli::{Cli, Commands};
use client::PredictClient;
use config::Config;
use error::Result;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Predict { target, endpoint, crop, advisory, heatmap, recursive, json } => {
            let table = config.resolve_advisory(advisory.as_deref(), crop)?;
            let endpoint = config.resolve_endpoint(endpoint.as_deref());
            let client = PredictClient::new(endpoint, config.timeout())?;

            let images = scanner::collect_targets(&target, recursive)?;
            if images.is_empty() {
                return Err(error::LeafDoctorError::NoImagesFound(target.display().to_string()));
            }

            if !json {
                println!("🌿 leaf-doctor - 病害診断\n");
                println!("送信先: {}", client.endpoint());
            }

            let progress = if json {
                ProgressBar::hidden()
            } else {
                ProgressBar::new(images.len() as u64)
            };
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            progress.enable_steady_tick(Duration::from_millis(120));

            let results = diagnose::diagnose_all(&client, &images, &table, |d| {
                progress.set_message(d.file_name.clone());
                progress.inc(1);
            })
            .await;
            progress.finish_and_clear();

            let multiple = results.len() > 1;
            let mut heatmap_failures = 0;
            for diagnosis in &results {
                if json {
                    println!("{}", serde_json::to_string(&report::JsonReport::new(diagnosis))?);
                } else {
                    println!("\n📷 {}", diagnosis.file_name);
                    match &diagnosis.outcome {
                        Ok(prediction) => {
                            print!("{}", report::render_prediction(prediction, diagnosis.advisory.as_ref()))
                        }
                        Err(failure) => println!("  ✖ {}", failure),
                    }
                }

                let saved = heatmap
                    .as_deref()
                    .and_then(|base| report::save_heatmap(diagnosis, base, multiple));
                match saved {
                    Some(Ok(path)) => {
                        log::info!("heatmap saved: {}", path.display());
                        if !json {
                            println!("  ✔ ヒートマップを保存: {}", path.display());
                        }
                    }
                    Some(Err(e)) => {
                        heatmap_failures += 1;
                        log::warn!("{}: heatmap not saved: {}", diagnosis.file_name, e);
                        if !json {
                            println!("  ✖ ヒートマップを保存できません: {}", e);
                        }
                    }
                    None => {}
                }
            }

            let failed = results.iter().filter(|d| !d.is_success()).count();
            if !json {
                if failed == 0 {
                    println!("\n✅ 診断完了");
                } else {
                    println!("\n⚠ {}件中{}件で失敗しました", results.len(), failed);
                }
                if heatmap_failures > 0 {
                    println!("⚠ ヒートマップ{}件を保存できませんでした", heatmap_failures);
                }
            }
        }

        Commands::Ping { endpoint } => {
            let endpoint = config.resolve_endpoint(endpoint.as_deref());
            let client = PredictClient::new(endpoint, config.timeout())?;
            let message = client.ping().await?;
            println!("✔ {} : {}", client.endpoint(), message);
        }

        Commands::Advisory { label, crop, advisory } => {
            let table = config.resolve_advisory(advisory.as_deref(), crop)?;
            match label {
                Some(label) => match table.lookup(&label) {
                    Some(entry) => {
                        println!("{}", label);
                        println!("  Common Symptoms:\n    {}", entry.symptoms);
                        println!("  Recommended Treatment:\n    {}", entry.treatment);
                    }
                    None => println!("アドバイス表に '{}' はありません", label),
                },
                None => {
                    for name in table.labels() {
                        println!("{}", name);
                    }
                }
            }
        }

        Commands::Config { set_endpoint, set_crop, set_advisory, set_timeout, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint);
                changed = true;
            }
            if let Some(crop) = set_crop {
                config.set_crop(crop);
                changed = true;
            }
            if let Some(path) = set_advisory {
                if !path.exists() {
                    return Err(error::LeafDoctorError::FileNotFound(path.display().to_string()));
                }
                config.advisory_path = Some(path);
                changed = true;
            }
            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds);
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  予測サービス: {}", config.endpoint);
                println!("  作物プリセット: {}", config.crop);
                println!(
                    "  アドバイス表: {}",
                    config
                        .advisory_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(プリセット)".into())
                );
                match config.timeout_seconds {
                    Some(seconds) => println!("  タイムアウト: {}秒", seconds),
                    None => println!("  タイムアウト: (既定)"),
                }
            }
        }
    }

    Ok(())
}
