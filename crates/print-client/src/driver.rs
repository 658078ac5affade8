//! The driver seam: everything that touches a device goes through
//! [`LabelDriver`].

use std::time::Duration;

use serde::Serialize;
use zmlabel_core::{InterfaceKind, LabelConfig, LabelElement, PrinterConfig};

use crate::error::DriverError;
use crate::status::DeviceStatus;

/// One composed request: configuration plus elements, borrowed read-only.
#[derive(Debug, Clone, Copy)]
pub struct PrintJob<'a> {
    /// Printer settings.
    pub printer: &'a PrinterConfig,
    /// Label stock geometry.
    pub label: &'a LabelConfig,
    /// Elements in drawing order.
    pub elements: &'a [LabelElement],
}

impl<'a> PrintJob<'a> {
    /// Compose a job.
    pub fn new(printer: &'a PrinterConfig, label: &'a LabelConfig, elements: &'a [LabelElement]) -> Self {
        Self {
            printer,
            label,
            elements,
        }
    }
}

/// A rendered preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    /// Width in device dots.
    pub width_px: u32,
    /// Height in device dots.
    pub height_px: u32,
    /// Encoded image, in whatever format the driver produces.
    pub data: Vec<u8>,
}

/// Tag memory to read back.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagArea {
    /// Tag identifier.
    #[default]
    Tid,
    /// Electronic product code.
    Epc,
    /// Both, TID first.
    TidAndEpc,
}

impl TagArea {
    /// Driver code: 0 TID, 1 EPC, 2 TID+EPC.
    pub fn code(self) -> u32 {
        match self {
            TagArea::Tid => 0,
            TagArea::Epc => 1,
            TagArea::TidAndEpc => 2,
        }
    }

    /// Inverse of [`TagArea::code`].
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(TagArea::Tid),
            1 => Some(TagArea::Epc),
            2 => Some(TagArea::TidAndEpc),
            _ => None,
        }
    }
}

/// Parameters of a UHF tag read.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagReadRequest {
    /// Memory to read.
    pub area: TagArea,
    /// Read power; 0 keeps the printer's setting.
    pub power: u32,
    /// Where the label stops after reading; 2 is the print position.
    pub stop_position: u32,
    /// How long the driver may wait for a tag.
    pub timeout: Duration,
}

impl Default for TagReadRequest {
    fn default() -> Self {
        Self {
            area: TagArea::Tid,
            power: 0,
            stop_position: 2,
            timeout: Duration::from_millis(2000),
        }
    }
}

impl TagReadRequest {
    /// Default request for `area`.
    pub fn new(area: TagArea) -> Self {
        Self {
            area,
            ..Self::default()
        }
    }
}

/// A label printer driver.
///
/// Calls take `&mut self`, so one connection has at most one call in flight.
pub trait LabelDriver {
    /// Render the job without printing.
    fn render_preview(&mut self, job: &PrintJob<'_>) -> Result<PreviewImage, DriverError>;

    /// Print the job `copies` times and return how many copies printed.
    ///
    /// The pipeline passes `copies > 1` only when
    /// [`supports_copy_count`](LabelDriver::supports_copy_count) is true. A
    /// batch that stops part way reports the copies already out in
    /// [`DriverError::Failed::printed`](DriverError::Failed).
    fn dispatch_print(&mut self, job: &PrintJob<'_>, copies: u32) -> Result<u32, DriverError>;

    /// Current device status.
    fn query_status(&mut self, printer: &PrinterConfig) -> Result<DeviceStatus, DriverError>;

    /// Read UHF tag memory as the driver formats it.
    fn read_rfid_tag(
        &mut self,
        printer: &PrinterConfig,
        label: &LabelConfig,
        request: &TagReadRequest,
    ) -> Result<String, DriverError>;

    /// Identifiers of devices reachable over `interface`.
    fn list_connected_devices(&mut self, interface: InterfaceKind) -> Result<Vec<String>, DriverError>;

    /// Whether one `dispatch_print` call can print several copies.
    fn supports_copy_count(&self) -> bool {
        false
    }
}

impl<D: LabelDriver + ?Sized> LabelDriver for &mut D {
    fn render_preview(&mut self, job: &PrintJob<'_>) -> Result<PreviewImage, DriverError> {
        (**self).render_preview(job)
    }

    fn dispatch_print(&mut self, job: &PrintJob<'_>, copies: u32) -> Result<u32, DriverError> {
        (**self).dispatch_print(job, copies)
    }

    fn query_status(&mut self, printer: &PrinterConfig) -> Result<DeviceStatus, DriverError> {
        (**self).query_status(printer)
    }

    fn read_rfid_tag(
        &mut self,
        printer: &PrinterConfig,
        label: &LabelConfig,
        request: &TagReadRequest,
    ) -> Result<String, DriverError> {
        (**self).read_rfid_tag(printer, label, request)
    }

    fn list_connected_devices(&mut self, interface: InterfaceKind) -> Result<Vec<String>, DriverError> {
        (**self).list_connected_devices(interface)
    }

    fn supports_copy_count(&self) -> bool {
        (**self).supports_copy_count()
    }
}
