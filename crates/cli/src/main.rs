mod input;
mod logging;
mod render;

use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use zmlabel_core::{
    Diagnostic, InterfaceKind, LabelConfig, LabelDocument, Operate, PrinterConfig, apply_bindings,
    decode_wire,
};
use zmlabel_diagnostics as diag;
use zmlabel_print_client::{
    MonitorConfig, MonitorOutcome, MonitorReport, PayloadOutcome, PrintOptions, PrintOutcome,
    RetryConfig, RetryDriver, StatusMonitor, TagArea, TagReadRequest, VirtualPrinter, list_devices,
    preview, print_with_progress, query_status, read_uhf_tag, run_payload,
};

use crate::input::{DocFormat, Loaded};
use crate::render::{Format, print_summary, render_diagnostics, status_line};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "zmlabel",
    version,
    about = "Inspect, convert, preview, and print label documents"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log filter directive (e.g. "debug", "zmlabel_core=trace"). Overrides
    /// ZMLABEL_LOG_LEVEL.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also write logs to this file, appending. Overrides ZMLABEL_LOG_FILE.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Documents ───────────────────────────────────────────────────
    /// Decode an LSF file or wire payload and show its contents.
    Inspect {
        file: PathBuf,
        /// Input format; detected from the extension when omitted.
        #[arg(long, value_enum)]
        input_format: Option<DocFormat>,
    },

    /// Convert between LSF and wire JSON.
    Convert {
        file: PathBuf,
        #[arg(long, value_enum)]
        input_format: Option<DocFormat>,
        /// Target format.
        #[arg(long, value_enum)]
        to: DocFormat,
        /// Write here instead of stdout.
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// `printnum` for JSON output; defaults to the input's copy count.
        #[arg(long)]
        copies: Option<u32>,
        /// `Operate` for JSON output; defaults to the input's.
        #[arg(long)]
        operate: Option<String>,
    },

    // ── Printing ────────────────────────────────────────────────────
    /// Render a preview image (PBM) without printing.
    Preview {
        file: PathBuf,
        #[arg(long, value_enum)]
        input_format: Option<DocFormat>,
        /// Where to write the image.
        #[arg(long, short)]
        out: PathBuf,
        #[command(flatten)]
        sim: SimulationArgs,
    },

    /// Print a document on the virtual printer.
    Print {
        file: PathBuf,
        #[arg(long, value_enum)]
        input_format: Option<DocFormat>,
        /// Copies to print; defaults to the payload's `printnum`, or 1.
        #[arg(long)]
        copies: Option<u32>,
        /// Keep printing the remaining copies after one fails.
        #[arg(long)]
        continue_on_error: bool,
        /// Replace an element's payload before printing. Repeatable.
        #[arg(long = "bind", value_name = "NAME=VALUE", value_parser = parse_binding)]
        bindings: Vec<(String, String)>,
        /// Monitor the printer until the job settles.
        #[arg(long)]
        wait: bool,
        /// Monitoring budget in milliseconds, counted from dispatch.
        #[arg(long, default_value_t = 15_000)]
        timeout_ms: u64,
        /// Delay between status polls in milliseconds.
        #[arg(long, default_value_t = 500)]
        poll_ms: u64,
        #[command(flatten)]
        sim: SimulationArgs,
    },

    /// Execute a wire payload according to its `Operate` field.
    Run {
        file: PathBuf,
        /// Keep printing the remaining copies after one fails.
        #[arg(long)]
        continue_on_error: bool,
        /// Where to write the image when the payload asks for a preview.
        #[arg(long, short)]
        out: Option<PathBuf>,
        #[command(flatten)]
        sim: SimulationArgs,
    },

    // ── Device ──────────────────────────────────────────────────────
    /// Query the printer status.
    Status {
        #[command(flatten)]
        device: DeviceArgs,
        #[command(flatten)]
        sim: SimulationArgs,
    },

    /// List devices reachable over an interface.
    Devices {
        #[command(flatten)]
        device: DeviceArgs,
        /// Device identifiers the virtual printer reports. Repeatable.
        #[arg(long = "simulate-device", value_name = "ID")]
        simulated: Vec<String>,
        #[command(flatten)]
        sim: SimulationArgs,
    },

    /// Read UHF tag memory through an RFID printer.
    ReadTag {
        /// Memory area to read.
        #[arg(long, value_enum, default_value_t = AreaArg::Tid)]
        area: AreaArg,
        #[command(flatten)]
        device: DeviceArgs,
        /// Tag data the virtual printer reports.
        #[arg(long = "simulate-tag", value_name = "DATA")]
        tag: Option<String>,
        #[command(flatten)]
        sim: SimulationArgs,
    },

    // ── Reference ───────────────────────────────────────────────────
    /// Explain a diagnostic ID (e.g. ZML1101).
    Explain { id: String },
}

/// How the virtual printer behaves.
#[derive(Args, Debug, Clone)]
struct SimulationArgs {
    /// Status codes reported by successive queries, before the printer
    /// settles on ready (0).
    #[arg(
        long = "simulate-status",
        value_name = "CODES",
        value_delimiter = ',',
        allow_hyphen_values = true
    )]
    statuses: Vec<i32>,
    /// Fail a dispatch (0-based) with a device code, optionally after some
    /// copies of a native batch printed. Repeatable.
    #[arg(long = "simulate-failure", value_name = "INDEX:CODE[:PRINTED]", value_parser = parse_failure)]
    failures: Vec<(usize, i32, u32)>,
    /// Let the printer take every copy in one call.
    #[arg(long)]
    native_copies: bool,
    /// Report the printer as unreachable.
    #[arg(long)]
    offline: bool,
    /// Attempts per driver call while the printer is unreachable.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    attempts: u32,
}

impl SimulationArgs {
    fn driver(&self, base: VirtualPrinter) -> RetryDriver<VirtualPrinter> {
        let mut printer = base
            .with_statuses(self.statuses.iter().copied())
            .with_copy_count(self.native_copies);
        for &(index, code, printed) in &self.failures {
            printer = printer.fail_dispatch_after(index, code, printed);
        }
        if self.offline {
            printer = printer.unavailable();
        }
        RetryDriver::new(printer, RetryConfig::new(self.attempts, Duration::from_millis(100)))
    }
}

/// Which printer to talk to.
#[derive(Args, Debug, Clone)]
struct DeviceArgs {
    /// Printer interface.
    #[arg(long, value_enum)]
    interface: Option<InterfaceArg>,
    /// Network address, for network interfaces.
    #[arg(long)]
    address: Option<String>,
    /// Installed driver name, for the driver interface.
    #[arg(long)]
    driver_name: Option<String>,
}

impl DeviceArgs {
    fn printer(&self, default: InterfaceKind) -> Result<PrinterConfig> {
        let interface = self.interface.map_or(default, InterfaceKind::from);
        let mut builder = PrinterConfig::builder(interface);
        if let Some(address) = &self.address {
            builder = builder.address(address.clone());
        }
        if let Some(name) = &self.driver_name {
            builder = builder.driver_name(name.clone());
        }
        builder.build().context("invalid printer settings")
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InterfaceArg {
    Usb,
    Net,
    Driver,
    RfidUsb,
    RfidNet,
}

impl From<InterfaceArg> for InterfaceKind {
    fn from(arg: InterfaceArg) -> Self {
        match arg {
            InterfaceArg::Usb => InterfaceKind::Usb,
            InterfaceArg::Net => InterfaceKind::Network,
            InterfaceArg::Driver => InterfaceKind::Driver,
            InterfaceArg::RfidUsb => InterfaceKind::RfidUsb,
            InterfaceArg::RfidNet => InterfaceKind::RfidNetwork,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AreaArg {
    Tid,
    Epc,
    /// TID followed by EPC.
    Both,
}

impl From<AreaArg> for TagArea {
    fn from(arg: AreaArg) -> Self {
        match arg {
            AreaArg::Tid => TagArea::Tid,
            AreaArg::Epc => TagArea::Epc,
            AreaArg::Both => TagArea::TidAndEpc,
        }
    }
}

fn parse_binding(value: &str) -> Result<(String, String), String> {
    let (name, data) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{value}'"))?;
    if name.is_empty() {
        return Err("binding name is empty".to_string());
    }
    Ok((name.to_string(), data.to_string()))
}

fn parse_failure(value: &str) -> Result<(usize, i32, u32), String> {
    let (index, rest) = value
        .split_once(':')
        .ok_or_else(|| format!("expected INDEX:CODE[:PRINTED], got '{value}'"))?;
    let (code, printed) = match rest.rsplit_once(':') {
        Some((code, printed)) => (code, Some(printed)),
        None => (rest, None),
    };
    let index = index.trim().parse::<usize>().map_err(|e| format!("bad index '{index}': {e}"))?;
    let code = code.trim().parse::<i32>().map_err(|e| format!("bad code '{code}': {e}"))?;
    let printed = printed
        .map(|p| p.trim().parse::<u32>().map_err(|e| format!("bad printed count '{p}': {e}")))
        .transpose()?
        .unwrap_or(0);
    Ok((index, code, printed))
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    let result = logging::init(cli.log_level.as_deref(), cli.log_file.as_deref())
        .and_then(|()| run(cli.cmd, format));
    match result {
        Ok(code) => code,
        Err(err) => {
            report_error(&err, format);
            ExitCode::FAILURE
        }
    }
}

fn run(cmd: Cmd, format: Format) -> Result<ExitCode> {
    match cmd {
        Cmd::Inspect { file, input_format } => cmd_inspect(&file, input_format, format),
        Cmd::Convert {
            file,
            input_format,
            to,
            out,
            copies,
            operate,
        } => cmd_convert(&file, input_format, to, out.as_deref(), copies, operate.as_deref(), format),
        Cmd::Preview {
            file,
            input_format,
            out,
            sim,
        } => cmd_preview(&file, input_format, &out, &sim, format),
        Cmd::Print {
            file,
            input_format,
            copies,
            continue_on_error,
            bindings,
            wait,
            timeout_ms,
            poll_ms,
            sim,
        } => {
            let monitor = wait.then(|| {
                StatusMonitor::new(MonitorConfig::with_timing(
                    Duration::from_millis(poll_ms),
                    Duration::from_millis(timeout_ms),
                ))
            });
            let request = PrintRequest {
                copies,
                stop_at_error: !continue_on_error,
                bindings: &bindings,
                monitor: monitor.as_ref(),
            };
            cmd_print(&file, input_format, &request, &sim, format)
        }
        Cmd::Run {
            file,
            continue_on_error,
            out,
            sim,
        } => cmd_run(&file, !continue_on_error, out.as_deref(), &sim, format),
        Cmd::Status { device, sim } => cmd_status(&device, &sim, format),
        Cmd::Devices {
            device,
            simulated,
            sim,
        } => cmd_devices(&device, simulated, &sim, format),
        Cmd::ReadTag {
            area,
            device,
            tag,
            sim,
        } => cmd_read_tag(area.into(), &device, tag, &sim, format),
        Cmd::Explain { id } => cmd_explain(&id, format),
    }
}

// ── Document commands ───────────────────────────────────────────────────

fn cmd_inspect(file: &Path, input_format: Option<DocFormat>, format: Format) -> Result<ExitCode> {
    let loaded = input::load(file, input_format)?;
    let ok = loaded.error.is_none();

    match format {
        Format::Json => {
            let out = json!({
                "ok": ok,
                "file": loaded.path,
                "format": loaded.format.as_str(),
                "version": loaded.version,
                "document": loaded.document,
                "copies": loaded.copies,
                "operate": loaded.operate.as_ref().map(Operate::as_str),
                "failed": loaded.failed,
                "error": loaded.error,
                "diagnostics": loaded.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if let Some(doc) = &loaded.document {
                print_document(&loaded, doc);
            }
            show_diagnostics(&loaded);
            match &loaded.error {
                None => status_line(true, "ok", &loaded.path),
                Some(err) => status_line(false, "error", &err.to_string()),
            }
        }
    }
    Ok(exit_code(ok))
}

fn print_document(loaded: &Loaded, doc: &LabelDocument) {
    let version = loaded.version.map(|v| format!(" v{v}")).unwrap_or_default();
    println!("{} ({}{version})", loaded.path, loaded.format.as_str());
    let p = &doc.printer;
    println!(
        "printer   {} {} dpi, speed {}, darkness {}",
        p.interface.wire_name(),
        p.dpi,
        p.speed,
        p.darkness
    );
    let l = &doc.label;
    println!("label     {} x {} mm, gap {} mm", l.width_mm, l.height_mm, l.gap_mm);
    println!("elements  {}", doc.elements.len());
    for element in &doc.elements {
        let (x, y) = element.position();
        let payload = element.payload().map(|p| format!("{p:?}")).unwrap_or_default();
        println!(
            "  {:<8} {:<16} ({x:.2}, {y:.2})  {payload}",
            element.kind().as_str(),
            element.name()
        );
    }
}

fn cmd_convert(
    file: &Path,
    input_format: Option<DocFormat>,
    to: DocFormat,
    out: Option<&Path>,
    copies: Option<u32>,
    operate: Option<&str>,
    format: Format,
) -> Result<ExitCode> {
    let loaded = input::load(file, input_format)?;
    if format == Format::Pretty {
        show_diagnostics(&loaded);
    }
    let doc = loaded.require_document()?;
    let operate = operate.map(Operate::parse).or_else(|| loaded.operate.clone());
    let text = input::encode(doc, to, copies.unwrap_or(loaded.copies), operate.as_ref())?;

    let Some(out) = out else {
        print!("{text}");
        return Ok(ExitCode::SUCCESS);
    };
    fs::write(out, &text).with_context(|| format!("failed to write '{}'", out.display()))?;
    match format {
        Format::Json => {
            let result = json!({
                "status": "converted",
                "file": out.display().to_string(),
                "format": to.as_str(),
                "elements": doc.elements.len(),
                "diagnostics": loaded.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Pretty => status_line(true, "converted", &out.display().to_string()),
    }
    Ok(ExitCode::SUCCESS)
}

// ── Print commands ──────────────────────────────────────────────────────

fn cmd_preview(
    file: &Path,
    input_format: Option<DocFormat>,
    out: &Path,
    sim: &SimulationArgs,
    format: Format,
) -> Result<ExitCode> {
    let loaded = input::load(file, input_format)?;
    if format == Format::Pretty {
        show_diagnostics(&loaded);
    }
    let doc = loaded.require_document()?;
    let mut driver = sim.driver(VirtualPrinter::new());

    let rendered = preview(&mut driver, &doc.printer, &doc.label, &doc.elements)
        .with_context(|| format!("'{}' cannot be previewed", loaded.path))?;
    let Some(image) = rendered else {
        bail!("no preview was rendered for '{}'", loaded.path);
    };
    fs::write(out, &image.data).with_context(|| format!("failed to write '{}'", out.display()))?;

    match format {
        Format::Json => {
            let result = json!({
                "file": out.display().to_string(),
                "width_px": image.width_px,
                "height_px": image.height_px,
                "bytes": image.data.len(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Pretty => status_line(
            true,
            "preview",
            &format!("{} ({} x {} dots)", out.display(), image.width_px, image.height_px),
        ),
    }
    Ok(ExitCode::SUCCESS)
}

/// Options of the `print` command after argument parsing.
struct PrintRequest<'a> {
    copies: Option<u32>,
    stop_at_error: bool,
    bindings: &'a [(String, String)],
    monitor: Option<&'a StatusMonitor>,
}

fn cmd_print(
    file: &Path,
    input_format: Option<DocFormat>,
    request: &PrintRequest<'_>,
    sim: &SimulationArgs,
    format: Format,
) -> Result<ExitCode> {
    let loaded = input::load(file, input_format)?;
    if format == Format::Pretty {
        show_diagnostics(&loaded);
    }
    let mut doc = loaded.require_document()?.clone();

    let reports = apply_bindings(
        &mut doc.elements,
        request.bindings.iter().map(|(n, v)| (n.as_str(), v.as_str())),
    );
    let bind_diagnostics: Vec<Diagnostic> = reports
        .iter()
        .flat_map(|r| r.diagnostics.iter().cloned())
        .collect();
    if format == Format::Pretty {
        render_diagnostics(&loaded.source, &loaded.path, &bind_diagnostics);
    }
    if let Some(missed) = reports.iter().find(|r| !r.updated) {
        match missed.diagnostics.iter().find(|d| d.is_error()) {
            Some(d) => bail!("cannot bind '{}': {}", missed.name, d.message),
            None => bail!("no element named '{}'", missed.name),
        }
    }

    let options = PrintOptions::copies(request.copies.unwrap_or(loaded.copies))
        .stop_at_error(request.stop_at_error);
    let mut driver = sim.driver(VirtualPrinter::new());
    let dispatched_at = Instant::now();
    let outcome = print_with_progress(&mut driver, &doc.printer, &doc.label, &doc.elements, &options, |p| {
        if format == Format::Pretty {
            let state = if p.last_code == 0 {
                "ok".to_string()
            } else {
                format!("code {}", p.last_code)
            };
            eprintln!("copy {}/{}: {state}", p.attempted, p.total);
        }
        ControlFlow::Continue(())
    })?;

    let report = match request.monitor {
        Some(monitor) if outcome.is_success() => Some(monitor.run(&mut driver, &doc.printer, dispatched_at)?),
        _ => None,
    };
    let ok = outcome.is_success() && report.as_ref().is_none_or(|r| r.outcome.is_completed());

    match format {
        Format::Json => {
            let result = json!({
                "ok": ok,
                "outcome": outcome,
                "monitor": report,
                "bindings": reports,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Pretty => {
            print_outcome(&outcome);
            if let Some(report) = &report {
                print_monitor(report);
            }
        }
    }
    Ok(exit_code(ok))
}

fn print_outcome(outcome: &PrintOutcome) {
    let detail = format!("{}/{} copies", outcome.printed, outcome.requested);
    if outcome.is_success() {
        status_line(true, "printed", &detail);
        return;
    }
    let mut detail = format!("{detail}, code {}", outcome.code);
    if outcome.aborted {
        detail.push_str(", stopped early");
    }
    if let Some(status) = &outcome.final_status {
        detail.push_str(&format!(", printer reports {status}"));
    }
    status_line(false, "print failed", &detail);
}

fn print_monitor(report: &MonitorReport) {
    let polls = report.polls;
    match &report.outcome {
        MonitorOutcome::Completed { status } => {
            status_line(true, "completed", &format!("{status} after {polls} polls"));
        }
        MonitorOutcome::Failed { status } => {
            status_line(false, "device error", &format!("{status} after {polls} polls"));
        }
        MonitorOutcome::TimedOut { last } => {
            let last = last.as_ref().map_or_else(|| "no reading".to_string(), ToString::to_string);
            status_line(false, "timed out", &format!("last {last}, {polls} polls"));
        }
        MonitorOutcome::Cancelled => status_line(false, "cancelled", &format!("{polls} polls")),
        _ => status_line(false, "monitoring ended", &report.bucket.to_string()),
    }
}

fn cmd_run(
    file: &Path,
    stop_at_error: bool,
    out: Option<&Path>,
    sim: &SimulationArgs,
    format: Format,
) -> Result<ExitCode> {
    let path = file.display().to_string();
    let source = fs::read_to_string(file).with_context(|| format!("failed to read '{path}'"))?;
    let decoded = decode_wire(&source);
    let diagnostics = decoded.diagnostics.clone();
    let failed = decoded.failed.clone();
    if format == Format::Pretty {
        render_diagnostics(&source, &path, &diagnostics);
        print_summary(&diagnostics);
    }

    let mut driver = sim.driver(VirtualPrinter::new());
    let outcome = run_payload(&mut driver, decoded, stop_at_error)?;

    if let (PayloadOutcome::Previewed(Some(image)), Some(out)) = (&outcome, out) {
        fs::write(out, &image.data).with_context(|| format!("failed to write '{}'", out.display()))?;
    }
    let ok = match &outcome {
        PayloadOutcome::Printed(print) => print.is_success(),
        PayloadOutcome::Previewed(image) => image.is_some(),
        _ => true,
    };

    match format {
        Format::Json => {
            let result = json!({
                "ok": ok,
                "file": path,
                "result": outcome.summary(),
                "failed": failed,
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Pretty => match &outcome {
            PayloadOutcome::Printed(print) => print_outcome(print),
            PayloadOutcome::Previewed(image) => status_line(
                image.is_some(),
                "preview",
                if image.is_some() { "rendered" } else { "not rendered" },
            ),
            PayloadOutcome::NoAction { operate } => status_line(
                true,
                "no action taken",
                &operate.clone().unwrap_or_else(|| "no Operate field".to_string()),
            ),
            _ => {}
        },
    }
    Ok(exit_code(ok))
}

// ── Device commands ─────────────────────────────────────────────────────

fn cmd_status(device: &DeviceArgs, sim: &SimulationArgs, format: Format) -> Result<ExitCode> {
    let printer = device.printer(InterfaceKind::Usb)?;
    let mut driver = sim.driver(VirtualPrinter::new());
    let status = query_status(&mut driver, &printer)?;
    let bucket = status.bucket();

    match format {
        Format::Json => {
            let result = json!({
                "code": status.code,
                "message": status.message,
                "bucket": bucket,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Pretty => println!("{bucket}: {status}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_devices(
    device: &DeviceArgs,
    simulated: Vec<String>,
    sim: &SimulationArgs,
    format: Format,
) -> Result<ExitCode> {
    let interface = device.interface.map_or(InterfaceKind::Usb, InterfaceKind::from);
    let mut base = VirtualPrinter::new();
    if !simulated.is_empty() {
        base = base.with_devices(simulated);
    }
    let mut driver = sim.driver(base);
    let devices = list_devices(&mut driver, interface)?;

    match format {
        Format::Json => {
            let result = json!({
                "interface": interface.wire_name(),
                "devices": devices,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Pretty => {
            if devices.is_empty() {
                eprintln!("no devices on {}", interface.wire_name());
            }
            for id in &devices {
                println!("{id}");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_read_tag(
    area: TagArea,
    device: &DeviceArgs,
    tag: Option<String>,
    sim: &SimulationArgs,
    format: Format,
) -> Result<ExitCode> {
    let printer = device.printer(InterfaceKind::RfidUsb)?;
    let mut base = VirtualPrinter::new();
    if let Some(tag) = tag {
        base = base.with_tag(tag);
    }
    let mut driver = sim.driver(base);
    let data = read_uhf_tag(&mut driver, &printer, &LabelConfig::default(), &TagReadRequest::new(area))?;

    match format {
        Format::Json => {
            let result = json!({ "area": area, "data": data });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Pretty => println!("{data}"),
    }
    Ok(ExitCode::SUCCESS)
}

// ── Reference ───────────────────────────────────────────────────────────

fn cmd_explain(id: &str, format: Format) -> Result<ExitCode> {
    match format {
        Format::Json => {
            let out = json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn show_diagnostics(loaded: &Loaded) {
    render_diagnostics(&loaded.source, &loaded.path, &loaded.diagnostics);
    print_summary(&loaded.diagnostics);
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Failure output: a JSON envelope on stdout, or a plain line on stderr.
fn report_error(err: &anyhow::Error, format: Format) {
    tracing::debug!(error = ?err, "command failed");
    match format {
        Format::Json => {
            let out = json!({
                "success": false,
                "error": "command_failed",
                "message": format!("{err:#}"),
            });
            println!("{out:#}");
        }
        Format::Pretty => eprintln!("error: {err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_arguments() {
        assert_eq!(parse_binding("sku=A=1").unwrap(), ("sku".into(), "A=1".into()));
        assert_eq!(parse_binding("note=").unwrap(), ("note".into(), String::new()));
        assert!(parse_binding("=x").is_err());
        assert!(parse_binding("plain").is_err());
    }

    #[test]
    fn failure_arguments() {
        assert_eq!(parse_failure("1:81").unwrap(), (1, 81, 0));
        assert_eq!(parse_failure("0:-5").unwrap(), (0, -5, 0));
        assert_eq!(parse_failure("0:81:2").unwrap(), (0, 81, 2));
        assert!(parse_failure("0:81:x").is_err());
        assert!(parse_failure("x:81").is_err());
        assert!(parse_failure("81").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
