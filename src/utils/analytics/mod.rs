pub mod models;
pub mod windows;

use std::cmp::Ordering;

use tracing::trace;

use crate::utils::guestlist::models::{AttendanceStatus, GuestlistJoinRequest, RequestStatus};
use crate::utils::ids::PromoterId;
use crate::utils::schedule::models::Promoter;

use self::models::{
    AccessTier, Booking, GuestlistPerformance, PromoterStats, SortKey, SortOrder, TierPerformance,
    Window,
};
use self::windows::AnalyticsClock;

pub fn bookings_in_window<'b>(
    bookings: &'b [Booking],
    window: Window,
    clock: &AnalyticsClock,
) -> impl Iterator<Item = &'b Booking> + 'b {
    let clock = *clock;
    bookings
        .iter()
        .filter(move |booking| clock.includes(window, booking.timestamp))
}

pub fn compute_revenue(bookings: &[Booking], window: Window, clock: &AnalyticsClock) -> f64 {
    bookings_in_window(bookings, window, clock)
        .map(Booking::revenue)
        .sum()
}

pub fn compute_booking_count(bookings: &[Booking], window: Window, clock: &AnalyticsClock) -> usize {
    bookings_in_window(bookings, window, clock).count()
}

fn performance_of<'r>(requests: impl Iterator<Item = &'r GuestlistJoinRequest>) -> GuestlistPerformance {
    let mut perf = GuestlistPerformance::default();
    for request in requests.filter(|r| r.status == RequestStatus::Approved) {
        perf.approved += 1;
        match request.attendance_status {
            AttendanceStatus::Show => perf.shows += 1,
            AttendanceStatus::NoShow => perf.no_shows += 1,
            AttendanceStatus::Pending => perf.pending += 1,
        }
    }

    let attended = perf.shows + perf.no_shows;
    perf.show_rate = if attended == 0 {
        0.0
    } else {
        perf.shows as f64 / attended as f64
    };
    perf
}

/// Approved requests of the promoter dated inside the window, split by attendance.
pub fn compute_guestlist_performance(
    requests: &[GuestlistJoinRequest],
    promoter_id: PromoterId,
    window: Window,
    clock: &AnalyticsClock,
) -> GuestlistPerformance {
    performance_of(
        requests
            .iter()
            .filter(|r| r.promoter_id == promoter_id)
            .filter(|r| clock.includes_date(window, r.date)),
    )
}

/// Performance per access tier, across all promoters when `promoter_id` is `None`.
pub fn compute_tier_performance(
    requests: &[GuestlistJoinRequest],
    promoter_id: Option<PromoterId>,
    window: Window,
    clock: &AnalyticsClock,
) -> Vec<TierPerformance> {
    [AccessTier::Vip, AccessTier::Standard]
        .into_iter()
        .map(|tier| TierPerformance {
            tier,
            performance: performance_of(
                requests
                    .iter()
                    .filter(|r| promoter_id.map_or(true, |id| r.promoter_id == id))
                    .filter(|r| AccessTier::of(r.is_vip) == tier)
                    .filter(|r| clock.includes_date(window, r.date)),
            ),
        })
        .collect()
}

pub fn promoter_stats(
    promoter: &Promoter,
    bookings: &[Booking],
    requests: &[GuestlistJoinRequest],
    window: Window,
    clock: &AnalyticsClock,
) -> PromoterStats {
    let own_bookings: Vec<&Booking> = bookings_in_window(bookings, window, clock)
        .filter(|booking| booking.promoter_id == Some(promoter.id))
        .collect();

    PromoterStats {
        promoter_id: promoter.id,
        name: promoter.name.clone(),
        revenue: own_bookings.iter().map(|booking| booking.revenue()).sum(),
        bookings: own_bookings.len(),
        guestlist: compute_guestlist_performance(requests, promoter.id, window, clock),
    }
}

fn compare_by(key: SortKey, a: &PromoterStats, b: &PromoterStats) -> Ordering {
    match key {
        SortKey::Revenue => a.revenue.total_cmp(&b.revenue),
        SortKey::Bookings => a.bookings.cmp(&b.bookings),
        SortKey::Approved => a.guestlist.approved.cmp(&b.guestlist.approved),
        SortKey::Shows => a.guestlist.shows.cmp(&b.guestlist.shows),
        SortKey::ShowRate => a.guestlist.show_rate.total_cmp(&b.guestlist.show_rate),
    }
}

/// Per-promoter stats sorted by `key`. Ties are always broken by ascending
/// promoter id, whatever the order.
pub fn rank_promoters(
    promoters: &[Promoter],
    bookings: &[Booking],
    requests: &[GuestlistJoinRequest],
    window: Window,
    clock: &AnalyticsClock,
    key: SortKey,
    order: SortOrder,
) -> Vec<PromoterStats> {
    let mut ranking: Vec<PromoterStats> = promoters
        .iter()
        .map(|promoter| promoter_stats(promoter, bookings, requests, window, clock))
        .collect();

    ranking.sort_by(|a, b| {
        let by_key = match order {
            SortOrder::Ascending => compare_by(key, a, b),
            SortOrder::Descending => compare_by(key, b, a),
        };
        by_key.then_with(|| a.promoter_id.cmp(&b.promoter_id))
    });

    trace!("Ranked {} promoters by {key:?} over {window}", ranking.len());
    ranking
}
