use foundation::LatLon;
use serde::Serialize;
use tracing::debug;

use crate::layer::TileLayerId;
use crate::markers::{Marker, Overlay};
use crate::popup::PreviewFragment;
use crate::widget::{MapWidget, TileHandle};

/// What the map is looking at.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Viewport {
    pub center: LatLon,
    pub zoom: u8,
    pub active_layer: TileLayerId,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: LatLon::new(51.505, -0.09),
            zoom: 13,
            active_layer: TileLayerId::Standard,
        }
    }
}

/// Single source of truth for the mounted tile layer, the view and the
/// marker overlays.
///
/// Invariants:
/// - At most one tile layer is mounted; a swap detaches before attaching.
/// - Marker replacement clears the overlay and re-adds every marker.
/// - The zoom stays inside the active tile source's range.
#[derive(Debug)]
pub struct MapSurface<W: MapWidget> {
    widget: W,
    viewport: Viewport,
    tile: TileHandle,
    points: Vec<Marker>,
    user: Vec<Marker>,
}

impl<W: MapWidget> MapSurface<W> {
    pub fn new(mut widget: W, viewport: Viewport) -> Self {
        let source = viewport.active_layer.source();
        let viewport = Viewport {
            zoom: source.clamp_zoom(viewport.zoom),
            ..viewport
        };
        let tile = widget.attach_tile_layer(source);
        widget.set_view(viewport.center, viewport.zoom);
        Self {
            widget,
            viewport,
            tile,
            points: Vec::new(),
            user: Vec::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// Programmatic recenter.
    pub fn set_center(&mut self, center: LatLon, zoom: u8) {
        let zoom = self.viewport.active_layer.source().clamp_zoom(zoom);
        self.viewport.center = center;
        self.viewport.zoom = zoom;
        self.widget.set_view(center, zoom);
    }

    /// Records a pan/zoom the widget already performed.
    pub fn sync_viewport(&mut self, center: LatLon, zoom: u8) {
        self.viewport.center = center;
        self.viewport.zoom = self.viewport.active_layer.source().clamp_zoom(zoom);
    }

    /// Swaps the base map. Returns `false` when `id` is already active.
    pub fn set_active_layer(&mut self, id: TileLayerId) -> bool {
        if id == self.viewport.active_layer {
            return false;
        }
        let source = id.source();
        debug!(from = %self.viewport.active_layer, to = %id, "swapping tile layer");

        self.widget.detach_tile_layer(self.tile);
        self.tile = self.widget.attach_tile_layer(source);
        self.viewport.active_layer = id;

        let zoom = source.clamp_zoom(self.viewport.zoom);
        if zoom != self.viewport.zoom {
            self.viewport.zoom = zoom;
            self.widget.set_view(self.viewport.center, zoom);
        }
        true
    }

    /// Clears `overlay` and adds `markers`, without diffing.
    pub fn replace_markers(&mut self, overlay: Overlay, markers: Vec<Marker>) {
        self.widget.clear_overlay(overlay);
        for marker in &markers {
            self.widget.add_marker(overlay, marker);
        }
        *self.overlay_mut(overlay) = markers;
    }

    pub fn markers(&self, overlay: Overlay) -> &[Marker] {
        match overlay {
            Overlay::PointsOfInterest => &self.points,
            Overlay::UserLocation => &self.user,
        }
    }

    /// Activates a marker; returns its preview if it has one.
    pub fn select_marker(&mut self, overlay: Overlay, index: usize) -> Option<&PreviewFragment> {
        let preview = match overlay {
            Overlay::PointsOfInterest => self.points.get(index)?.on_select.as_ref()?,
            Overlay::UserLocation => self.user.get(index)?.on_select.as_ref()?,
        };
        self.widget.open_preview(preview);
        Some(preview)
    }

    fn overlay_mut(&mut self, overlay: Overlay) -> &mut Vec<Marker> {
        match overlay {
            Overlay::PointsOfInterest => &mut self.points,
            Overlay::UserLocation => &mut self.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MapSurface, Viewport};
    use crate::layer::TileLayerId;
    use crate::markers::{Marker, Overlay};
    use crate::widget::{HeadlessWidget, TileHandle, WidgetOp};
    use foundation::{LatLon, PageId};
    use nearby::PointOfInterest;
    use pretty_assertions::assert_eq;

    fn surface() -> MapSurface<HeadlessWidget> {
        let mut s = MapSurface::new(HeadlessWidget::new(), Viewport::default());
        s.widget_mut().drain_ops();
        s
    }

    fn point(id: u64, lat: f64, lon: f64) -> PointOfInterest {
        PointOfInterest {
            id: PageId(id),
            title: format!("Page {id}"),
            summary: "Summary".to_string(),
            canonical_url: format!("https://en.wikipedia.org/?curid={id}"),
            coordinate: LatLon::new(lat, lon),
            thumbnail: None,
        }
    }

    #[test]
    fn construction_mounts_one_layer_and_sets_view() {
        let s = MapSurface::new(HeadlessWidget::new(), Viewport::default());
        assert_eq!(
            s.widget().ops(),
            &[
                WidgetOp::Attach(TileHandle(1), TileLayerId::Standard),
                WidgetOp::SetView(LatLon::new(51.505, -0.09), 13),
            ]
        );
    }

    #[test]
    fn set_center_updates_view_and_widget() {
        let mut s = surface();
        let paris = LatLon::new(48.8566, 2.3522);
        s.set_center(paris, 13);
        assert_eq!(s.viewport().center, paris);
        assert_eq!(s.viewport().zoom, 13);
        assert_eq!(s.widget().view(), Some((paris, 13)));
    }

    #[test]
    fn sync_viewport_does_not_echo_to_widget() {
        let mut s = surface();
        s.sync_viewport(LatLon::new(40.0, -3.0), 9);
        assert_eq!(s.viewport().zoom, 9);
        assert!(s.widget().ops().is_empty());
    }

    #[test]
    fn layer_swap_detaches_before_attaching() {
        let mut s = surface();
        assert!(s.set_active_layer(TileLayerId::Satellite));
        assert_eq!(
            s.widget().ops(),
            &[
                WidgetOp::Detach(TileHandle(1)),
                WidgetOp::Attach(TileHandle(2), TileLayerId::Satellite),
            ]
        );
        assert_eq!(s.widget().mounted(), &[(TileHandle(2), TileLayerId::Satellite)]);
        assert!(!s.set_active_layer(TileLayerId::Satellite));
    }

    #[test]
    fn layer_swap_clamps_zoom() {
        let mut s = surface();
        s.set_center(LatLon::new(46.5, 8.0), 19);
        s.widget_mut().drain_ops();

        s.set_active_layer(TileLayerId::Explore);
        assert_eq!(s.viewport().zoom, 17);
        assert_eq!(
            s.widget().ops().last(),
            Some(&WidgetOp::SetView(LatLon::new(46.5, 8.0), 17))
        );
    }

    #[test]
    fn replace_markers_clears_then_adds() {
        let mut s = surface();
        let first: Vec<Marker> = [point(1, 51.5, -0.1), point(2, 51.51, -0.11)]
            .iter()
            .map(Marker::for_point)
            .collect();
        s.replace_markers(Overlay::PointsOfInterest, first);
        s.replace_markers(
            Overlay::PointsOfInterest,
            vec![Marker::for_point(&point(3, 51.52, -0.12))],
        );

        assert_eq!(s.markers(Overlay::PointsOfInterest).len(), 1);
        assert_eq!(s.widget().markers(Overlay::PointsOfInterest).len(), 1);
        let ops = s.widget().ops();
        assert_eq!(ops[3], WidgetOp::ClearOverlay(Overlay::PointsOfInterest));
        assert_eq!(
            ops[4],
            WidgetOp::AddMarker(Overlay::PointsOfInterest, LatLon::new(51.52, -0.12))
        );

        s.replace_markers(Overlay::PointsOfInterest, Vec::new());
        assert!(s.widget().markers(Overlay::PointsOfInterest).is_empty());
    }

    #[test]
    fn overlays_are_independent() {
        let mut s = surface();
        s.replace_markers(
            Overlay::UserLocation,
            vec![Marker::user_location(LatLon::new(51.5, -0.1))],
        );
        s.replace_markers(Overlay::PointsOfInterest, Vec::new());
        assert_eq!(s.markers(Overlay::UserLocation).len(), 1);
        assert_eq!(s.widget().markers(Overlay::UserLocation).len(), 1);
    }

    #[test]
    fn selecting_a_marker_opens_its_preview() {
        let mut s = surface();
        s.replace_markers(
            Overlay::PointsOfInterest,
            vec![Marker::for_point(&point(7, 51.5, -0.1))],
        );
        s.replace_markers(
            Overlay::UserLocation,
            vec![Marker::user_location(LatLon::new(51.5, -0.1))],
        );

        let title = s
            .select_marker(Overlay::PointsOfInterest, 0)
            .map(|p| p.title.clone());
        assert_eq!(title.as_deref(), Some("Page 7"));
        assert_eq!(
            s.widget().ops().last(),
            Some(&WidgetOp::OpenPreview("Page 7".to_string()))
        );
        assert!(s.select_marker(Overlay::UserLocation, 0).is_none());
        assert!(s.select_marker(Overlay::PointsOfInterest, 5).is_none());
    }
}
