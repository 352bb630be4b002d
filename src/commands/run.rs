//! # run 命令实现
//!
//! 展开模拟计划 -> 校验 -> 本地并行执行 -> 项目重算 -> 存盘。
//! 单个作业失败不阻塞整批，最终按成功/失败/取消计数汇报。
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `commands/validate.rs` 的计划展开
//! - 使用 `runner/`, `project.rs`, `utils/output.rs`

use std::fs;

use crate::backend;
use crate::cli::run::RunArgs;
use crate::commands::validate::{describe_options, expand_plan};
use crate::error::{EpmakitError, Result};
use crate::project::Project;
use crate::runner::local::LocalSimulationRunner;
use crate::runner::token::TaskToken;
use crate::utils::{output, progress};

/// 执行 run 命令
pub fn execute(args: RunArgs) -> Result<()> {
    output::print_header("Simulation Run");

    let list_options = expand_plan(&args.plan)?;
    let standards = list_options.iter().filter(|o| o.is_standard()).count();
    output::print_info(&format!(
        "Expanded to {} options ({} unknowns, {} standards)",
        list_options.len(),
        list_options.len() - standards,
        standards
    ));

    // 先校验全部选项；任何一份失败都在此阻止提交
    let registry = backend::global_registry();
    let mut invalid = 0;
    for (index, options) in list_options.iter().enumerate() {
        let adapter = registry.get(&options.program.identifier)?;
        if let Err(e) = adapter.create_validator().validate(options) {
            invalid += 1;
            output::print_error(&format!("{}\n{}", describe_options(index, options), e));
        }
    }
    if invalid > 0 {
        return Err(EpmakitError::Other(format!(
            "{} of {} options failed validation",
            invalid,
            list_options.len()
        )));
    }

    if args.dry_run {
        // 只跑导出检查，不写文件、不执行
        for options in &list_options {
            let adapter = registry.get(&options.program.identifier)?;
            adapter
                .create_exporter()
                .export(options, &args.output, true)?;
        }
        output::print_done(&format!(
            "Dry run: {} options validated and export-checked",
            list_options.len()
        ));
        return Ok(());
    }

    fs::create_dir_all(&args.output).map_err(|e| EpmakitError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    // 并行执行
    let runner = LocalSimulationRunner::new(&registry, &args.output).with_jobs(args.jobs);
    let token = TaskToken::new();
    let report = runner.submit(&list_options, &token)?;

    for (identifier, reason) in &report.failures {
        output::print_error(&format!("Simulation {} failed: {}", identifier, reason));
    }
    if report.cancelled > 0 {
        output::print_cancelled(&format!("{} simulation(s) cancelled", report.cancelled));
    }

    // 汇入项目并重算派生结果（k 比率等）
    let mut project = Project::new();
    for simulation in report.simulations {
        project.add_simulation(simulation);
    }

    let spinner = progress::create_spinner("Recalculating derived results");
    let recalc_token = TaskToken::new();
    let new_results = project.recalculate(&recalc_token)?;
    spinner.finish_and_clear();
    output::print_info(&format!("{} derived result(s) calculated", new_results));

    let project_path = args
        .project
        .unwrap_or_else(|| args.output.join("project.json"));
    project.write(&project_path)?;
    output::print_success(&format!("Project saved to '{}'", project_path.display()));

    output::print_separator();
    output::print_done(&format!(
        "{} succeeded, {} failed, {} cancelled",
        project.simulations.len(),
        report.failures.len(),
        report.cancelled
    ));

    Ok(())
}
