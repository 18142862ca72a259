use std::collections::BTreeMap;

use foundation::LatLon;

use crate::layer::{TileLayerId, TileSource};
use crate::markers::{Marker, Overlay};
use crate::popup::PreviewFragment;

/// Handle to a mounted tile layer, issued by the widget.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TileHandle(pub u64);

/// The map widget the surface drives.
///
/// The widget owns drawing and gestures; the surface owns the state. It is
/// handed to [`MapSurface`](crate::surface::MapSurface) at construction
/// rather than reached through a global.
pub trait MapWidget {
    fn set_view(&mut self, center: LatLon, zoom: u8);
    fn attach_tile_layer(&mut self, source: &TileSource) -> TileHandle;
    fn detach_tile_layer(&mut self, handle: TileHandle);
    fn clear_overlay(&mut self, overlay: Overlay);
    fn add_marker(&mut self, overlay: Overlay, marker: &Marker);
    fn open_preview(&mut self, _preview: &PreviewFragment) {}
}

/// Every call a [`HeadlessWidget`] received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetOp {
    SetView(LatLon, u8),
    Attach(TileHandle, TileLayerId),
    Detach(TileHandle),
    ClearOverlay(Overlay),
    AddMarker(Overlay, LatLon),
    OpenPreview(String),
}

/// Widget without a display: keeps what would be on screen.
///
/// Used by tests and the command-line viewer.
#[derive(Debug, Default)]
pub struct HeadlessWidget {
    ops: Vec<WidgetOp>,
    view: Option<(LatLon, u8)>,
    mounted: Vec<(TileHandle, TileLayerId)>,
    overlays: BTreeMap<Overlay, Vec<Marker>>,
    next_handle: u64,
}

impl HeadlessWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[WidgetOp] {
        &self.ops
    }

    pub fn drain_ops(&mut self) -> Vec<WidgetOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn view(&self) -> Option<(LatLon, u8)> {
        self.view
    }

    pub fn mounted(&self) -> &[(TileHandle, TileLayerId)] {
        &self.mounted
    }

    pub fn markers(&self, overlay: Overlay) -> &[Marker] {
        self.overlays.get(&overlay).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl MapWidget for HeadlessWidget {
    fn set_view(&mut self, center: LatLon, zoom: u8) {
        self.view = Some((center, zoom));
        self.ops.push(WidgetOp::SetView(center, zoom));
    }

    fn attach_tile_layer(&mut self, source: &TileSource) -> TileHandle {
        self.next_handle += 1;
        let handle = TileHandle(self.next_handle);
        self.mounted.push((handle, source.id));
        self.ops.push(WidgetOp::Attach(handle, source.id));
        handle
    }

    fn detach_tile_layer(&mut self, handle: TileHandle) {
        self.mounted.retain(|(h, _)| *h != handle);
        self.ops.push(WidgetOp::Detach(handle));
    }

    fn clear_overlay(&mut self, overlay: Overlay) {
        self.overlays.remove(&overlay);
        self.ops.push(WidgetOp::ClearOverlay(overlay));
    }

    fn add_marker(&mut self, overlay: Overlay, marker: &Marker) {
        self.overlays.entry(overlay).or_default().push(marker.clone());
        self.ops.push(WidgetOp::AddMarker(overlay, marker.coordinate));
    }

    fn open_preview(&mut self, preview: &PreviewFragment) {
        self.ops.push(WidgetOp::OpenPreview(preview.title.clone()));
    }
}
