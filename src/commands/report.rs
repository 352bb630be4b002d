//! # report 命令实现
//!
//! 读入项目文件，把每个模拟的光子强度与 k 比率结果汇成终端
//! 表格，谱线记号遵循用户偏好设置；可选导出 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/report.rs` 定义的参数
//! - 使用 `project.rs`, `settings.rs`
//! - 使用 `tabled` 与 `csv`

use std::path::Path;

use tabled::{Table, Tabled};

use crate::cli::report::ReportArgs;
use crate::error::Result;
use crate::project::Project;
use crate::results::SimulationResult;
use crate::settings::Settings;
use crate::utils::output;

/// 报告行
#[derive(Debug, Clone, Tabled)]
struct ReportRow {
    #[tabled(rename = "Simulation")]
    simulation: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Result")]
    result_kind: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Uncertainty")]
    uncertainty: String,
}

/// 执行 report 命令
pub fn execute(args: ReportArgs) -> Result<()> {
    output::print_header("Project Report");

    let project = Project::read(&args.project)?;
    let settings = Settings::load();

    output::print_info(&format!(
        "{} simulation(s) in '{}'",
        project.simulations.len(),
        args.project.display()
    ));

    let rows = collect_rows(&project, &settings);
    if rows.is_empty() {
        output::print_warning("No results to report.");
        return Ok(());
    }

    let table = Table::new(&rows);
    println!("{}", table);

    if let Some(csv_path) = &args.csv {
        save_rows_csv(&rows, csv_path)?;
        output::print_success(&format!("Report saved to '{}'", csv_path.display()));
    }

    Ok(())
}

fn collect_rows(project: &Project, settings: &Settings) -> Vec<ReportRow> {
    let mut rows = Vec::new();

    for (index, simulation) in project.simulations.iter().enumerate() {
        let name = format!("#{:03}", index + 1);
        let role = if simulation.options.is_standard() {
            "standard"
        } else {
            "unknown"
        };

        for result in &simulation.results {
            match result {
                SimulationResult::PhotonIntensity(intensity) => {
                    for (line, value) in intensity.iter() {
                        rows.push(ReportRow {
                            simulation: name.clone(),
                            role: role.to_string(),
                            result_kind: result.kind().to_string(),
                            line: settings.format_xrayline(line),
                            value: format!("{:.6e}", value.nominal),
                            uncertainty: format!("{:.6e}", value.std_dev),
                        });
                    }
                }
                SimulationResult::KRatio(kratio) => {
                    for (line, value) in kratio.iter() {
                        rows.push(ReportRow {
                            simulation: name.clone(),
                            role: role.to_string(),
                            result_kind: result.kind().to_string(),
                            line: settings.format_xrayline(line),
                            value: format!("{:.6}", value.nominal),
                            uncertainty: format!("{:.6}", value.std_dev),
                        });
                    }
                }
            }
        }
    }

    rows
}

/// 保存报告到 CSV
fn save_rows_csv(rows: &[ReportRow], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "simulation",
        "role",
        "result",
        "line",
        "value",
        "uncertainty",
    ])?;

    for row in rows {
        wtr.write_record([
            row.simulation.as_str(),
            row.role.as_str(),
            row.result_kind.as_str(),
            row.line.as_str(),
            row.value.as_str(),
            row.uncertainty.as_str(),
        ])?;
    }

    wtr.flush().map_err(|e| crate::error::EpmakitError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
