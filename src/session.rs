//! # Editing Session
//!
//! One in-memory receipt being edited: the document state, the signature
//! pad, and the user-level operations over both. The session is driven
//! serially by user input; every operation completes synchronously before
//! the next is processed.
//!
//! Outcomes the user should see are returned as [`Notice`] values
//! (toast-style), and printing/sharing are delegated to host facilities
//! behind the [`PrintFacility`] and [`ShareFacility`] traits. Facility
//! failures are caught and reported; they never mutate document state.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::{DetailsUpdate, ReceiptData};
use crate::error::KuitansiError;
use crate::format::rupiah;
use crate::ledger::{IdSource, ItemUpdate};
use crate::render::render_text;
use crate::signature::{Point, SignatureMethod, SignaturePad, SignatureResult};

/// Default capture surface size in pixels.
pub const PAD_WIDTH: usize = 480;
pub const PAD_HEIGHT: usize = 300;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Error,
}

/// A non-blocking, toast-style notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    /// The notice shown to the user for a given error.
    pub fn for_error(err: &KuitansiError) -> Self {
        match err {
            KuitansiError::LastItem => Self::error(
                "Tidak Dapat Menghapus",
                "Anda harus memiliki setidaknya satu item",
            ),
            KuitansiError::UnknownItem(_) => Self::error(
                "Item Tidak Ditemukan",
                "Item yang diminta tidak ada di kuitansi",
            ),
            KuitansiError::EmptyGesture => Self::error(
                "Tanda Tangan Kosong",
                "Goresan tidak memuat titik apa pun",
            ),
            KuitansiError::ImageDecode(_) => Self::error(
                "Gagal Membaca Gambar",
                "Berkas yang diunggah bukan gambar yang valid",
            ),
            KuitansiError::ShareUnsupported => Self::error(
                "Berbagi Tidak Didukung",
                "Browser Anda tidak mendukung fitur berbagi langsung. \
                 Silakan gunakan opsi unduh dan bagikan secara manual.",
            ),
            KuitansiError::ShareFailed(_) => Self::error(
                "Gagal Berbagi",
                "Terjadi kesalahan saat berbagi kuitansi Anda. \
                 Silakan coba unduh sebagai gantinya.",
            ),
            KuitansiError::PrintFailed(_) => Self::error(
                "Gagal Membuat PDF",
                "Terjadi kesalahan saat menyiapkan kuitansi untuk dicetak",
            ),
            KuitansiError::Incomplete(fields) => Self::error(
                "Data Belum Lengkap",
                format!("Lengkapi kolom berikut: {}", fields),
            ),
            other => Self::error("Terjadi Kesalahan", other.to_string()),
        }
    }
}

/// Host print facility (e.g. the browser's native print dialog).
///
/// Invoked with no parameters; the call blocks until the host is done and
/// reports success or failure.
pub trait PrintFacility {
    fn print(&mut self) -> Result<(), KuitansiError>;
}

/// Host share facility (e.g. the Web Share API).
pub trait ShareFacility {
    /// Whether sharing is available in this environment.
    fn is_supported(&self) -> bool;

    fn share(&mut self, title: &str, text: &str) -> Result<(), KuitansiError>;
}

/// The editing session.
pub struct ReceiptSession {
    data: ReceiptData,
    pad: SignaturePad,
    ids: Box<dyn IdSource + Send + Sync>,
    /// Print-mode visual state, applied around print delegation.
    print_mode: bool,
}

impl ReceiptSession {
    pub fn new(mut ids: Box<dyn IdSource + Send + Sync>, today: chrono::NaiveDate) -> Self {
        let data = ReceiptData::new(ids.as_mut(), today);
        Self {
            data,
            pad: SignaturePad::new(PAD_WIDTH, PAD_HEIGHT),
            ids,
            print_mode: false,
        }
    }

    pub fn data(&self) -> &ReceiptData {
        &self.data
    }

    pub fn pad_mut(&mut self) -> &mut SignaturePad {
        &mut self.pad
    }

    pub fn print_mode(&self) -> bool {
        self.print_mode
    }

    // ── Form fields ─────────────────────────────────────────────────────

    pub fn update_details(&mut self, update: DetailsUpdate) {
        self.data.apply_details(update);
    }

    // ── Ledger ──────────────────────────────────────────────────────────

    pub fn add_item(&mut self) -> Uuid {
        let id = self.data.items.add_item(self.ids.as_mut());
        info!(%id, "item added");
        id
    }

    pub fn remove_item(&mut self, id: Uuid) -> Result<(), KuitansiError> {
        self.data.items.remove_item(id)?;
        info!(%id, total = self.data.items.total(), "item removed");
        Ok(())
    }

    pub fn update_item(&mut self, id: Uuid, update: ItemUpdate) -> Result<(), KuitansiError> {
        self.data.items.update_item(id, update)
    }

    pub fn total(&self) -> f64 {
        self.data.items.total()
    }

    // ── Signature ───────────────────────────────────────────────────────

    /// Apply one completed drawing gesture: the points of a single
    /// press-to-release interaction, in viewport coordinates. The surface
    /// contents (all strokes so far) become the payer signature, tagged
    /// as drawn.
    pub fn apply_gesture(&mut self, points: &[Point]) -> Result<Notice, KuitansiError> {
        let (first, rest) = points.split_first().ok_or(KuitansiError::EmptyGesture)?;
        self.pad.begin_stroke(*first);
        for point in rest {
            self.pad.stroke_to(*point);
        }
        if let Some(image) = self.pad.end_stroke()? {
            self.data.payer_signature = SignatureResult::Image {
                data_uri: image.to_data_uri(),
                method: SignatureMethod::Drawn,
            };
        }
        info!(points = points.len(), "signature gesture applied");
        Ok(signature_added_notice())
    }

    /// Store an uploaded signature image. The bytes are decoded first to
    /// verify they are a readable image; prior state is kept on failure.
    /// A later upload or gesture overwrites the signature whole
    /// (last write wins).
    pub fn apply_uploaded_signature(
        &mut self,
        bytes: &[u8],
        mime: &str,
    ) -> Result<Notice, KuitansiError> {
        self.data.payer_signature = SignatureResult::Image {
            data_uri: encode_upload(bytes, mime)?,
            method: SignatureMethod::Uploaded,
        };
        info!(size = bytes.len(), "signature uploaded");
        Ok(signature_added_notice())
    }

    /// Clear the signature: wipes the pad and yields the absent result.
    pub fn clear_signature(&mut self) -> Notice {
        self.pad.clear();
        self.data.payer_signature = SignatureResult::None;
        Notice::info("Tanda Tangan Dihapus", "Kuitansi tidak lagi ditandatangani")
    }

    /// Store an uploaded letterhead logo.
    pub fn set_logo(&mut self, bytes: &[u8], mime: &str) -> Result<Notice, KuitansiError> {
        self.data.logo = Some(encode_upload(bytes, mime)?);
        Ok(Notice::info(
            "Logo Ditambahkan",
            "Logo telah ditambahkan ke kuitansi",
        ))
    }

    // ── Rendering / delegation ──────────────────────────────────────────

    /// Render the receipt, or fail when required fields are missing.
    pub fn preview(&self, generated_on: chrono::NaiveDate) -> Result<String, KuitansiError> {
        let missing = self.data.missing_fields();
        if !missing.is_empty() {
            return Err(KuitansiError::Incomplete(missing.join(", ")));
        }
        Ok(render_text(&self.data, generated_on))
    }

    /// Delegate printing to the host facility.
    ///
    /// Print mode is applied around the delegation and reverted after the
    /// facility returns; the outcome only produces a notice, never a state
    /// change.
    pub fn print(&mut self, facility: &mut dyn PrintFacility) -> Notice {
        self.print_mode = true;
        let result = facility.print();
        self.print_mode = false;
        match result {
            Ok(()) => Notice::info(
                "PDF Dibuat",
                "Kuitansi Anda telah disiapkan untuk diunduh sebagai PDF",
            ),
            Err(err) => {
                warn!(%err, "print facility failed");
                Notice::for_error(&err)
            }
        }
    }

    /// Delegate sharing to the host facility with a title and summary
    /// derived from document state.
    pub fn share(&mut self, facility: &mut dyn ShareFacility) -> Notice {
        if !facility.is_supported() {
            return Notice::for_error(&KuitansiError::ShareUnsupported);
        }
        let title = format!("Kuitansi untuk {}", self.data.from);
        let text = format!(
            "Kuitansi pembayaran sebesar {} dari {}",
            rupiah(self.data.items.total()),
            self.data.from
        );
        match facility.share(&title, &text) {
            Ok(()) => Notice::info("Berhasil Dibagikan", "Kuitansi Anda telah dibagikan"),
            Err(err) => {
                warn!(%err, "share facility failed");
                Notice::for_error(&err)
            }
        }
    }
}

fn signature_added_notice() -> Notice {
    Notice::info(
        "Tanda Tangan Ditambahkan",
        "Tanda tangan telah ditambahkan ke kuitansi",
    )
}

/// Decode-check an uploaded image and encode it as a data URI.
fn encode_upload(bytes: &[u8], mime: &str) -> Result<String, KuitansiError> {
    image::load_from_memory(bytes).map_err(|e| KuitansiError::ImageDecode(e.to_string()))?;
    Ok(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
}
