/// Every tour that starts at city 0, in lexicographic order of the remaining cities.
///
/// Holding city 0 fixed removes the rotational duplicates of a closed tour,
/// so `n` cities produce `(n - 1)!` tours. A single city produces the trivial tour `[0]`.
/// Zero cities produce nothing.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    exhausted: bool,
}

impl Permutations {
    pub fn new(cities: usize) -> Self {
        Self {
            current: (0..cities).collect(),
            exhausted: cities == 0,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let tour = self.current.clone();
        self.exhausted = !next_permutation(&mut self.current[1..]);
        Some(tour)
    }
}

/// Rearrange `elements` into the next greater permutation.
///
/// Returns `false` and leaves `elements` untouched once it is the last, descending, permutation.
pub fn next_permutation<T: Ord>(elements: &mut [T]) -> bool {
    // Start of the longest non-increasing suffix
    let Some(pivot) = elements
        .windows(2)
        .rposition(|pair| pair[0] < pair[1])
    else {
        return false;
    };
    // Suffix is non-increasing, so the rightmost greater element is the smallest greater one
    let Some(successor) = elements[pivot + 1..]
        .iter()
        .rposition(|element| *element > elements[pivot])
    else {
        unreachable!("suffix contains the larger element of the ascending pair");
    };
    elements.swap(pivot, pivot + 1 + successor);
    elements[pivot + 1..].reverse();
    true
}
