use std::path::PathBuf;

/// Server-rendered score table and the report link that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResult {
    pub table_markup: String,
    pub download_url: String,
}

pub type DownloadId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReportDownload {
    #[default]
    Idle,
    InFlight(DownloadId),
    Saved(PathBuf),
}

/// Result container plus download affordance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultRenderer {
    rendered: Option<RenderedResult>,
    download: ReportDownload,
    next_download: DownloadId,
}

impl ResultRenderer {
    /// Replaces whatever was shown before; the markup is kept verbatim.
    pub(crate) fn show_result(
        &mut self,
        table_markup: impl Into<String>,
        download_url: impl Into<String>,
    ) {
        self.rendered = Some(RenderedResult {
            table_markup: table_markup.into(),
            download_url: download_url.into(),
        });
        self.download = ReportDownload::Idle;
    }

    /// Hides the container and the download affordance and drops the markup.
    pub(crate) fn reset(&mut self) {
        self.rendered = None;
        self.download = ReportDownload::Idle;
    }

    pub fn rendered(&self) -> Option<&RenderedResult> {
        self.rendered.as_ref()
    }

    pub fn download(&self) -> &ReportDownload {
        &self.download
    }

    /// Starts a download if a result is shown and none is running.
    pub(crate) fn begin_download(&mut self) -> Option<(DownloadId, String)> {
        if matches!(self.download, ReportDownload::InFlight(_)) {
            return None;
        }
        let url = self.rendered.as_ref()?.download_url.clone();
        self.next_download += 1;
        self.download = ReportDownload::InFlight(self.next_download);
        Some((self.next_download, url))
    }

    /// Records a finished download. Ignored unless `download` is the one in flight.
    pub(crate) fn finish_download(
        &mut self,
        download: DownloadId,
        saved: Option<PathBuf>,
    ) -> bool {
        if self.download != ReportDownload::InFlight(download) {
            return false;
        }
        self.download = match saved {
            Some(path) => ReportDownload::Saved(path),
            None => ReportDownload::Idle,
        };
        true
    }
}
