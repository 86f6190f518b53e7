// Simple moving average over the last SIZE samples

use num_traits::{Num, NumAssignOps, NumCast};

/// Moving average over the last `SIZE` samples.
///
/// A zero-sized window is rejected at compile time, through `new` and
/// `default` alike:
///
/// ```compile_fail
/// let _ = tiltfuse::filtering::sma::SmaFilter::<f32, 0>::default();
/// ```
pub struct SmaFilter<ItemT, const SIZE: usize> {
    buff: [ItemT; SIZE],
    idx: usize,
    sum: ItemT,
    full: bool,
}

impl<ItemT, const SIZE: usize> SmaFilter<ItemT, SIZE>
where
    ItemT: Num + NumAssignOps + NumCast + Copy,
{
    // SIZE must be non-zero
    const NON_EMPTY: () = assert!(SIZE > 0);

    pub fn new() -> SmaFilter<ItemT, SIZE> {
        SmaFilter::default()
    }

    pub fn reset(&mut self) {
        self.buff = [ItemT::zero(); SIZE];
        self.idx = 0;
        self.sum = ItemT::zero();
        self.full = false;
    }

    pub fn insert(&mut self, data: ItemT) {
        self.sum += data;
        self.sum -= self.buff[self.idx];
        self.buff[self.idx] = data;
        self.idx = (self.idx + 1) % SIZE;

        if self.idx == 0 {
            // we have looped around at least once
            self.full = true;
        }
    }

    // None until SIZE samples have been inserted
    pub fn filtered(&self) -> Option<ItemT> {
        if !self.full {
            return None;
        }
        let len: ItemT = NumCast::from(SIZE)?;
        Some(self.sum / len)
    }

    pub fn is_full(&self) -> bool {
        self.full
    }
}

impl<ItemT, const SIZE: usize> Default for SmaFilter<ItemT, SIZE>
where
    ItemT: Num + NumAssignOps + NumCast + Copy,
{
    fn default() -> SmaFilter<ItemT, SIZE> {
        let _ = Self::NON_EMPTY;
        SmaFilter {
            buff: [ItemT::zero(); SIZE],
            idx: 0,
            sum: ItemT::zero(),
            full: false,
        }
    }
}
