//! Fast-marching inpainting for erasing matched objects.
//!
//! Masked pixels are filled in order of their arrival time from the mask
//! boundary. Each filled pixel is a weighted average of already-known pixels
//! within `radius`, weighted by inverse squared distance, alignment with the
//! arrival-time gradient and similarity of arrival times (Telea, 2004).

use crate::frame::PixelBox;
use image::GrayImage;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

const UNREACHED: f32 = 1.0e6;

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Known,
    Band,
    Inside,
}

#[derive(Clone, Copy)]
struct Front {
    t: f32,
    idx: usize,
}

impl PartialEq for Front {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Front {}

impl PartialOrd for Front {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Front {
    // Min-heap on arrival time, ties broken by raster index.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .t
            .total_cmp(&self.t)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

/// Builds a mask covering `bbox` with inclusive corners, clipped to the image.
pub fn box_mask(width: usize, height: usize, bbox: &PixelBox) -> Vec<bool> {
    let mut mask = vec![false; width * height];
    if width == 0 || height == 0 {
        return mask;
    }
    let x2 = bbox.x2.min(width - 1);
    let y2 = bbox.y2.min(height - 1);
    for y in bbox.y1..=y2 {
        for x in bbox.x1..=x2 {
            mask[y * width + x] = true;
        }
    }
    mask
}

/// Fills every pixel with `mask[idx] == true` from its surroundings.
///
/// `mask` is row-major with one entry per pixel. A fully masked image has no
/// known pixels to propagate and is left untouched.
pub fn inpaint_telea(img: &mut GrayImage, mask: &[bool], radius: usize) {
    let width = img.width() as usize;
    let height = img.height() as usize;
    if mask.len() != width * height || !mask.contains(&false) {
        return;
    }
    let radius = radius.max(1);

    let mut state: Vec<State> = mask
        .iter()
        .map(|&m| if m { State::Inside } else { State::Known })
        .collect();
    let mut t = vec![0.0f32; width * height];
    let mut values: Vec<f32> = img.as_raw().iter().map(|&v| f32::from(v)).collect();
    let mut heap = BinaryHeap::new();

    for idx in 0..width * height {
        if state[idx] == State::Inside {
            t[idx] = UNREACHED;
            continue;
        }
        let touches_mask = neighbors4(idx, width, height).any(|n| state[n] == State::Inside);
        if touches_mask {
            state[idx] = State::Band;
            heap.push(Front { t: 0.0, idx });
        }
    }

    while let Some(Front { idx, .. }) = heap.pop() {
        if state[idx] == State::Known {
            continue;
        }
        state[idx] = State::Known;

        for n in neighbors4(idx, width, height) {
            if state[n] != State::Inside {
                continue;
            }
            t[n] = arrival_time(n, width, height, &state, &t);
            values[n] = fill_value(n, width, height, radius, &state, &t, &values);
            state[n] = State::Band;
            heap.push(Front { t: t[n], idx: n });
        }
    }

    for (dst, &v) in img.iter_mut().zip(values.iter()) {
        *dst = v.round().clamp(0.0, 255.0) as u8;
    }
}

fn neighbors4(idx: usize, width: usize, height: usize) -> impl Iterator<Item = usize> {
    let x = idx % width;
    let y = idx / width;
    let left = (x > 0).then(|| idx - 1);
    let right = (x + 1 < width).then(|| idx + 1);
    let up = (y > 0).then(|| idx - width);
    let down = (y + 1 < height).then(|| idx + width);
    [left, right, up, down].into_iter().flatten()
}

fn known_time(idx: Option<usize>, state: &[State], t: &[f32]) -> Option<f32> {
    idx.filter(|&i| state[i] != State::Inside).map(|i| t[i])
}

fn solve_pair(a: Option<f32>, b: Option<f32>) -> f32 {
    match (a, b) {
        (Some(t1), Some(t2)) => {
            let diff = t1 - t2;
            if diff * diff >= 2.0 {
                return t1.min(t2) + 1.0;
            }
            let r = (2.0 - diff * diff).sqrt();
            let s = (t1 + t2 - r) / 2.0;
            if s >= t1 && s >= t2 {
                s
            } else {
                s + r
            }
        }
        (Some(t1), None) => t1 + 1.0,
        (None, Some(t2)) => t2 + 1.0,
        (None, None) => UNREACHED,
    }
}

fn arrival_time(idx: usize, width: usize, height: usize, state: &[State], t: &[f32]) -> f32 {
    let x = idx % width;
    let y = idx / width;
    let left = known_time((x > 0).then(|| idx - 1), state, t);
    let right = known_time((x + 1 < width).then(|| idx + 1), state, t);
    let up = known_time((y > 0).then(|| idx - width), state, t);
    let down = known_time((y + 1 < height).then(|| idx + width), state, t);
    [
        solve_pair(up, left),
        solve_pair(up, right),
        solve_pair(down, left),
        solve_pair(down, right),
    ]
    .into_iter()
    .fold(UNREACHED, f32::min)
}

fn time_gradient(idx: usize, width: usize, height: usize, state: &[State], t: &[f32]) -> (f32, f32) {
    let x = idx % width;
    let y = idx / width;
    let at = |i: Option<usize>| known_time(i, state, t);
    let axis = |lo: Option<f32>, hi: Option<f32>, center: f32| match (lo, hi) {
        (Some(a), Some(b)) => (b - a) / 2.0,
        (Some(a), None) => center - a,
        (None, Some(b)) => b - center,
        (None, None) => 0.0,
    };
    let gx = axis(
        at((x > 0).then(|| idx - 1)),
        at((x + 1 < width).then(|| idx + 1)),
        t[idx],
    );
    let gy = axis(
        at((y > 0).then(|| idx - width)),
        at((y + 1 < height).then(|| idx + width)),
        t[idx],
    );
    (gx, gy)
}

fn fill_value(
    idx: usize,
    width: usize,
    height: usize,
    radius: usize,
    state: &[State],
    t: &[f32],
    values: &[f32],
) -> f32 {
    let px = (idx % width) as isize;
    let py = (idx / width) as isize;
    let r = radius as isize;
    let (gx, gy) = time_gradient(idx, width, height, state, t);

    let mut weighted = 0.0f32;
    let mut total = 0.0f32;
    let mut plain = 0.0f32;
    let mut plain_total = 0.0f32;
    for qy in (py - r).max(0)..=(py + r).min(height as isize - 1) {
        for qx in (px - r).max(0)..=(px + r).min(width as isize - 1) {
            let dx = (px - qx) as f32;
            let dy = (py - qy) as f32;
            let dist2 = dx * dx + dy * dy;
            if dist2 == 0.0 || dist2 > (r * r) as f32 {
                continue;
            }
            let q = qy as usize * width + qx as usize;
            if state[q] == State::Inside {
                continue;
            }
            let dst = 1.0 / dist2;
            let lev = 1.0 / (1.0 + (t[q] - t[idx]).abs());
            let dir = ((dx * gx + dy * gy) / dist2.sqrt()).abs();
            let w = dst * lev * dir;
            weighted += w * values[q];
            total += w;
            plain += dst * lev * values[q];
            plain_total += dst * lev;
        }
    }

    if total > f32::EPSILON {
        weighted / total
    } else if plain_total > 0.0 {
        plain / plain_total
    } else {
        values[idx]
    }
}
