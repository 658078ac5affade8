//! An in-process driver for tests and the CLI.
//!
//! Prints nothing. Dispatches are recorded, statuses come from a script,
//! and previews are 1-bit PBM images outlining each element's declared
//! bounds.

use std::collections::VecDeque;

use zmlabel_core::{InterfaceKind, LabelConfig, PrinterConfig};

use crate::driver::{LabelDriver, PreviewImage, PrintJob, TagReadRequest};
use crate::error::DriverError;
use crate::status::{DeviceStatus, STATUS_READY};

const MM_PER_INCH: f64 = 25.4;

/// One recorded `dispatch_print` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRecord {
    /// Copies requested in the call.
    pub copies: u32,
    /// Names of the elements in the job.
    pub elements: Vec<String>,
    /// Copies that came out.
    pub printed: u32,
    /// Whether the call succeeded.
    pub succeeded: bool,
}

#[derive(Debug, Clone, Copy)]
struct Failure {
    index: usize,
    code: i32,
    printed: u32,
}

/// Scripted driver.
#[derive(Debug, Clone, Default)]
pub struct VirtualPrinter {
    statuses: VecDeque<i32>,
    idle_status: i32,
    copy_count: bool,
    unavailable: bool,
    failures: Vec<Failure>,
    devices: Vec<String>,
    tag: Option<String>,
    dispatches: Vec<DispatchRecord>,
    status_queries: usize,
    previews: usize,
}

impl VirtualPrinter {
    /// A ready printer with one USB device attached.
    pub fn new() -> Self {
        Self {
            idle_status: STATUS_READY,
            devices: vec!["VIRTUAL-0001".to_string()],
            ..Self::default()
        }
    }

    /// Status codes returned by successive queries. Once used up, queries
    /// report `0` (ready).
    pub fn with_statuses(mut self, codes: impl IntoIterator<Item = i32>) -> Self {
        self.statuses = codes.into_iter().collect();
        self
    }

    /// Accept several copies in one dispatch.
    pub fn with_copy_count(mut self, supported: bool) -> Self {
        self.copy_count = supported;
        self
    }

    /// Fail the `index`-th dispatch (0-based) with `code`.
    pub fn fail_dispatch(self, index: usize, code: i32) -> Self {
        self.fail_dispatch_after(index, code, 0)
    }

    /// Fail the `index`-th dispatch with `code` once `printed` of its
    /// copies are out. Only matters for batches.
    pub fn fail_dispatch_after(mut self, index: usize, code: i32, printed: u32) -> Self {
        self.failures.push(Failure { index, code, printed });
        self
    }

    /// Every call reports the driver as unavailable.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Device identifiers reported by `list_connected_devices`.
    pub fn with_devices(mut self, devices: Vec<String>) -> Self {
        self.devices = devices;
        self
    }

    /// Data returned by tag reads.
    pub fn with_tag(mut self, data: impl Into<String>) -> Self {
        self.tag = Some(data.into());
        self
    }

    /// Bring an unavailable printer back.
    pub fn reconnect(&mut self) {
        self.unavailable = false;
    }

    /// Every dispatch so far, in order.
    pub fn dispatches(&self) -> &[DispatchRecord] {
        &self.dispatches
    }

    /// Status queries answered so far.
    pub fn status_queries(&self) -> usize {
        self.status_queries
    }

    /// Previews rendered so far.
    pub fn previews(&self) -> usize {
        self.previews
    }

    fn check_available(&self) -> Result<(), DriverError> {
        if self.unavailable {
            Err(DriverError::unavailable("virtual printer offline"))
        } else {
            Ok(())
        }
    }
}

impl LabelDriver for VirtualPrinter {
    fn render_preview(&mut self, job: &PrintJob<'_>) -> Result<PreviewImage, DriverError> {
        self.check_available()?;
        self.previews += 1;
        Ok(render_outline(job))
    }

    fn dispatch_print(&mut self, job: &PrintJob<'_>, copies: u32) -> Result<u32, DriverError> {
        self.check_available()?;
        let index = self.dispatches.len();
        let failure = self.failures.iter().find(|f| f.index == index).copied();
        let printed = failure.map_or(copies, |f| f.printed.min(copies));
        self.dispatches.push(DispatchRecord {
            copies,
            elements: job.elements.iter().map(|e| e.name().to_string()).collect(),
            printed,
            succeeded: failure.is_none(),
        });
        match failure {
            Some(f) => Err(DriverError::failed_after(printed, f.code, message_for(f.code))),
            None => Ok(printed),
        }
    }

    fn query_status(&mut self, _printer: &PrinterConfig) -> Result<DeviceStatus, DriverError> {
        self.check_available()?;
        self.status_queries += 1;
        let code = self.statuses.pop_front().unwrap_or(self.idle_status);
        Ok(DeviceStatus::new(code, message_for(code)))
    }

    fn read_rfid_tag(
        &mut self,
        printer: &PrinterConfig,
        _label: &LabelConfig,
        _request: &TagReadRequest,
    ) -> Result<String, DriverError> {
        self.check_available()?;
        if !printer.interface.is_rfid() {
            return Err(DriverError::failed(-2, "no RFID module"));
        }
        self.tag
            .clone()
            .ok_or_else(|| DriverError::failed(-3, "no tag in field"))
    }

    fn list_connected_devices(&mut self, interface: InterfaceKind) -> Result<Vec<String>, DriverError> {
        self.check_available()?;
        Ok(match interface {
            InterfaceKind::Usb | InterfaceKind::RfidUsb => self.devices.clone(),
            _ => Vec::new(),
        })
    }

    fn supports_copy_count(&self) -> bool {
        self.copy_count
    }
}

fn message_for(code: i32) -> &'static str {
    match code {
        0 => "ready",
        4 => "printing",
        96 => "waiting",
        81 => "paper out",
        82 => "ribbon out",
        83 => "printhead open",
        88 => "paused",
        _ => "device error",
    }
}

// ── Preview rendering ───────────────────────────────────────────────────

/// A bitmap, one bool per dot, row-major.
struct Canvas {
    width: usize,
    height: usize,
    dots: Vec<bool>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![false; width * height],
        }
    }

    fn set(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.dots[y * self.width + x] = true;
        }
    }

    /// Outline of the dot rectangle `[x0, x1] × [y0, y1]`.
    fn outline(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        for x in x0..=x1 {
            self.set(x, y0);
            self.set(x, y1);
        }
        for y in y0..=y1 {
            self.set(x0, y);
            self.set(x1, y);
        }
    }

    /// Binary PBM (`P4`): rows padded to whole bytes, 1 is black.
    fn into_pbm(self) -> Vec<u8> {
        let row_bytes = self.width.div_ceil(8);
        let mut out = format!("P4\n{} {}\n", self.width, self.height).into_bytes();
        out.reserve(row_bytes * self.height);
        for row in self.dots.chunks(self.width.max(1)) {
            let mut packed = vec![0u8; row_bytes];
            for (x, _) in row.iter().enumerate().filter(|(_, on)| **on) {
                packed[x / 8] |= 0x80 >> (x % 8);
            }
            out.extend_from_slice(&packed);
        }
        out
    }
}

fn render_outline(job: &PrintJob<'_>) -> PreviewImage {
    let dots_per_mm = f64::from(job.printer.dpi) / MM_PER_INCH;
    let to_dots = |mm: f64| (mm * dots_per_mm).round().max(0.0) as usize;
    let width = to_dots(job.label.width_mm).max(1);
    let height = to_dots(job.label.height_mm).max(1);

    let mut canvas = Canvas::new(width, height);
    for bounds in job.elements.iter().filter_map(|e| e.bounds()) {
        let x0 = to_dots(bounds.x_mm);
        let y0 = to_dots(bounds.y_mm);
        canvas.outline(x0, y0, to_dots(bounds.right()).max(x0), to_dots(bounds.bottom()).max(y0));
    }

    PreviewImage {
        width_px: u32::try_from(width).unwrap_or(u32::MAX),
        height_px: u32::try_from(height).unwrap_or(u32::MAX),
        data: canvas.into_pbm(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zmlabel_core::{ShapeElement, ShapeKind};

    #[test]
    fn preview_is_a_pbm_of_the_label_size() {
        let printer = PrinterConfig::builder(InterfaceKind::Usb).dpi(254).build().unwrap();
        let label = LabelConfig::new(10.0, 5.0, 2.0).unwrap();
        let frame = ShapeElement::new("frame", ShapeKind::Rectangle, (0.0, 0.0), (10.0, 5.0))
            .build()
            .unwrap();
        let elements = [frame];
        let image = render_outline(&PrintJob::new(&printer, &label, &elements));

        // 254 dpi is 10 dots per mm.
        assert_eq!((image.width_px, image.height_px), (100, 50));
        let header = b"P4\n100 50\n";
        assert!(image.data.starts_with(header));
        assert_eq!(image.data.len(), header.len() + 13 * 50);
        // Top-left dot of the frame is black.
        assert_eq!(image.data[header.len()] & 0x80, 0x80);
    }

    #[test]
    fn status_script_then_ready() {
        let mut vp = VirtualPrinter::new().with_statuses([4, 81]);
        let printer = PrinterConfig::default();
        let codes: Vec<_> = (0..3).map(|_| vp.query_status(&printer).unwrap().code).collect();
        assert_eq!(codes, [4, 81, 0]);
        assert_eq!(vp.status_queries(), 3);
    }

    #[test]
    fn scripted_dispatch_failure() {
        let mut vp = VirtualPrinter::new().fail_dispatch(1, 81);
        let printer = PrinterConfig::default();
        let label = LabelConfig::default();
        let job = PrintJob::new(&printer, &label, &[]);
        assert_eq!(vp.dispatch_print(&job, 1), Ok(1));
        assert_eq!(vp.dispatch_print(&job, 1), Err(DriverError::failed(81, "paper out")));
        assert_eq!(vp.dispatch_print(&job, 1), Ok(1));
        assert_eq!(
            vp.dispatches().iter().map(|d| d.succeeded).collect::<Vec<_>>(),
            [true, false, true]
        );
    }

    #[test]
    fn batch_failure_reports_copies_out() {
        let mut vp = VirtualPrinter::new()
            .with_copy_count(true)
            .fail_dispatch_after(0, 81, 2);
        let printer = PrinterConfig::default();
        let label = LabelConfig::default();
        let job = PrintJob::new(&printer, &label, &[]);
        assert_eq!(
            vp.dispatch_print(&job, 3),
            Err(DriverError::failed_after(2, 81, "paper out"))
        );
        assert_eq!(vp.dispatches()[0].printed, 2);
    }

    #[test]
    fn offline_until_reconnected() {
        let mut vp = VirtualPrinter::new().unavailable();
        assert!(vp.list_connected_devices(InterfaceKind::Usb).unwrap_err().is_retryable());
        vp.reconnect();
        assert_eq!(vp.list_connected_devices(InterfaceKind::Usb).unwrap(), ["VIRTUAL-0001"]);
        assert!(vp.list_connected_devices(InterfaceKind::Network).unwrap().is_empty());
    }
}
