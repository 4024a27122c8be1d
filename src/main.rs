//! `museumkit` - check a saved floor plan from the command line
//!
//! Loads a plan document, re-validates every element on every floor and
//! optionally previews what deleting one element would cascade into.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use museumkit::{
    init_logging, validate_element, EditorConfig, EditorState, ElementId, ElementType, PlanDocument,
    Severity, ValidationContext, BUILD_DATE, VERSION,
};

#[derive(Debug, Parser)]
#[command(name = "museumkit", version, about = "Validate museum floor plans")]
struct CliArgs {
    /// Plan document (JSON)
    plan: PathBuf,

    /// Configuration file; the user config directory is used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Treat warnings as failures
    #[arg(long)]
    strict: bool,

    /// Preview deleting an element, given as `<type>:<id>` (e.g. `room:gallery`)
    #[arg(long, value_name = "TYPE:ID")]
    delete: Option<String>,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = CliArgs::parse();
    tracing::info!("MuseumKit {} (built {})", VERSION, BUILD_DATE);

    let config = match &args.config {
        Some(path) => EditorConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::load_or_default()?,
    };

    let json = std::fs::read_to_string(&args.plan)
        .with_context(|| format!("reading {}", args.plan.display()))?;
    let document = PlanDocument::from_json(&json)?;
    document.check_integrity()?;

    let failures = report_validation(&document, &config, args.strict);

    if let Some(target) = &args.delete {
        let (element_type, id) = parse_target(target)?;
        let editor = EditorState::from_document(document, config)?;
        let plan = editor.preview_deletion(&id, element_type)?;
        println!();
        println!("Deleting {} {}:", element_type, id);
        for (floor_id, member_id, member_type, priority) in plan.removal_order() {
            println!("  [{}] {} {} on floor {}", priority, member_type, member_id, floor_id);
        }
        for link in &plan.orphaned_links {
            println!("  unlinks {} on floor {}: {}", link.link_id, link.floor_id, link.reason);
        }
        for warning in &plan.warnings {
            println!("  warning: {}", warning);
        }
        for warning in &plan.critical_warnings {
            println!("  CRITICAL: {}", warning);
        }
        println!("  {} element(s) in total", plan.estimated_impact.total_elements);
    }

    if failures > 0 {
        anyhow::bail!("{} element(s) failed validation", failures);
    }
    Ok(())
}

/// Print one line per element and return how many block a commit
fn report_validation(document: &PlanDocument, config: &EditorConfig, strict: bool) -> usize {
    let mut failures = 0;
    for floor in &document.floors {
        println!("Floor {} (level {})", floor.name, floor.level);
        let ctx = ValidationContext::new(floor, config)
            .with_floors(&document.floors)
            .strict(strict);
        for (id, element_type) in floor.element_ids() {
            let Some(result) = validate_element(id, element_type, &ctx) else {
                continue;
            };
            if result.blocks_commit(strict) {
                failures += 1;
            }
            let marker = match result.severity {
                Severity::Error => "ERR ",
                Severity::Warning => "WARN",
                Severity::Info => "ok  ",
            };
            println!("  {} {} {}: {} ({})", marker, element_type, id, result.message, result.code);
        }
    }
    failures
}

fn parse_target(target: &str) -> anyhow::Result<(ElementType, ElementId)> {
    let (kind, id) = target
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("expected <type>:<id>, got {:?}", target))?;
    let element_type = kind.parse::<ElementType>().map_err(anyhow::Error::msg)?;
    Ok((element_type, ElementId::new(id)))
}
