/// Merges two sequences sorted by the same ordering into `output`.
///
/// Elements that compare equal are combined by `op`, which may drop the pair
/// altogether by returning `Ok(None)` (e.g. when coefficients cancel out).
/// Elements present in only one of the sequences go through `single`, so the
/// caller can transform them (e.g. negate the subtrahend's terms).
///
/// Used to add and subtract polynomials.
pub fn try_sum<T, E>(
    mut a_iter: impl Iterator<Item = T>,
    mut b_iter: impl Iterator<Item = T>,
    cmp: impl Fn(&T, &T) -> std::cmp::Ordering,
    mut op: impl FnMut(T, T) -> Result<Option<T>, E>,
    mut single_b: impl FnMut(T) -> Result<T, E>,
    output: &mut Vec<T>,
) -> Result<(), E> {
    let mut a = a_iter.next();
    let mut b = b_iter.next();

    loop {
        match (a, b) {
            (Some(va), Some(vb)) => match cmp(&va, &vb) {
                std::cmp::Ordering::Equal => {
                    if let Some(r) = op(va, vb)? {
                        output.push(r);
                    }
                    a = a_iter.next();
                    b = b_iter.next();
                }
                std::cmp::Ordering::Less => {
                    output.push(va);
                    a = a_iter.next();
                    b = Some(vb);
                }
                std::cmp::Ordering::Greater => {
                    output.push(single_b(vb)?);
                    a = Some(va);
                    b = b_iter.next();
                }
            },
            (None, Some(vb)) => {
                output.push(single_b(vb)?);
                for vb in b_iter {
                    output.push(single_b(vb)?);
                }
                break;
            }
            (Some(va), None) => {
                output.push(va);
                output.extend(a_iter);
                break;
            }
            (None, None) => {
                break;
            }
        }
    }

    Ok(())
}

/// Merges runs of adjacent equal elements of an ordered vector, in place.
///
/// After a merge the surviving element is compared again with its next
/// neighbor, so runs of any length collapse into one element. If `op`
/// returns `Ok(None)` the merged element is removed, and the scan resumes
/// from the element that now occupies its position.
pub fn try_coalesce_adjacent<T, E>(
    elems: &mut Vec<T>,
    same: impl Fn(&T, &T) -> bool,
    mut op: impl FnMut(&T, &T) -> Result<Option<T>, E>,
) -> Result<(), E> {
    let mut i = 1;
    while i < elems.len() {
        if same(&elems[i - 1], &elems[i]) {
            match op(&elems[i - 1], &elems[i])? {
                Some(merged) => {
                    elems[i - 1] = merged;
                    elems.remove(i);
                }
                None => {
                    elems.drain(i - 1..=i);
                    // Whatever slid into i - 1 must still be checked against
                    // its left neighbor.
                    i = i.saturating_sub(1).max(1);
                }
            }
        } else {
            i += 1;
        }
    }

    Ok(())
}
