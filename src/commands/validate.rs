//! # validate 命令实现
//!
//! 展开模拟计划，对每份选项运行其后端的全部校验检查，
//! 汇报每份选项的完整问题列表。
//!
//! ## 依赖关系
//! - 使用 `cli/validate.rs` 定义的参数
//! - 使用 `models/options.rs`, `backend/`, `utils/output.rs`

use std::fs;
use std::path::Path;

use crate::backend;
use crate::cli::validate::ValidateArgs;
use crate::error::{EpmakitError, Result};
use crate::models::options::{Options, SimulationPlan};
use crate::utils::output;

/// 执行 validate 命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    output::print_header("Validating Simulation Plan");

    let list_options = expand_plan(&args.plan)?;
    output::print_info(&format!(
        "Expanded to {} options ({} standards)",
        list_options.len(),
        list_options.iter().filter(|o| o.is_standard()).count()
    ));

    let registry = backend::global_registry();
    let mut failed = 0;

    for (index, options) in list_options.iter().enumerate() {
        let label = describe_options(index, options);

        let outcome = registry
            .get(&options.program.identifier)
            .and_then(|adapter| adapter.create_validator().validate(options));

        match outcome {
            Ok(()) => output::print_success(&label),
            Err(e) => {
                failed += 1;
                output::print_error(&format!("{}\n{}", label, e));
            }
        }
    }

    output::print_separator();
    if failed > 0 {
        return Err(EpmakitError::Other(format!(
            "{} of {} options failed validation",
            failed,
            list_options.len()
        )));
    }

    output::print_done(&format!("All {} options are valid", list_options.len()));
    Ok(())
}

/// 读入计划文件并展开为选项列表
pub fn expand_plan(path: &Path) -> Result<Vec<Options>> {
    if !path.is_file() {
        return Err(EpmakitError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let text = fs::read_to_string(path).map_err(|e| EpmakitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let plan: SimulationPlan = serde_json::from_str(&text)?;
    plan.into_builder().build()
}

/// 单份选项的一行描述
pub fn describe_options(index: usize, options: &Options) -> String {
    let role = if options.is_standard() {
        "standard"
    } else {
        "unknown"
    };
    format!(
        "#{:03} [{}] {} / {:.1} keV / {}",
        index + 1,
        role,
        options.program.identifier,
        options.beam.energy_ev() / 1e3,
        options.sample.kind()
    )
}
