//! # 数值与集合比较工具
//!
//! 浮点近似相等与"相似序列"（多重集合）比较。去重与幂等性
//! 都建立在这里定义的值相等语义之上。
//!
//! ## 依赖关系
//! - 被 `models/` 全部值对象的 `PartialEq` 实现使用
//! - 无外部模块依赖

use std::collections::BTreeMap;

/// 默认相对容差
pub const REL_TOLERANCE: f64 = 1e-12;

/// 浮点近似相等（相对容差 + 绝对容差）
pub fn isclose(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff <= REL_TOLERANCE * a.abs().max(b.abs()) || diff <= f64::EPSILON
}

/// 两个权重映射是否逐项近似相等
pub fn are_maps_close(a: &BTreeMap<u8, f64>, b: &BTreeMap<u8, f64>) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .all(|(k, va)| b.get(k).is_some_and(|vb| isclose(*va, *vb)))
}

/// 两个序列是否"相似"：元素相同、顺序无关的多重集合比较。
/// 使用逐元素 `==` 而非哈希，每个元素只允许配对一次。
pub fn are_sequences_similar<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut used = vec![false; b.len()];
    for item in a {
        let found = b
            .iter()
            .enumerate()
            .position(|(i, other)| !used[i] && item == other);
        match found {
            Some(i) => used[i] = true,
            None => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isclose() {
        assert!(isclose(1.0, 1.0));
        assert!(isclose(1.0, 1.0 + 1e-15));
        assert!(!isclose(1.0, 1.0001));
        assert!(isclose(0.0, 0.0));
    }

    #[test]
    fn test_are_maps_close() {
        let mut a = BTreeMap::new();
        a.insert(8u8, 0.5);
        a.insert(13u8, 0.5);

        let mut b = BTreeMap::new();
        b.insert(13u8, 0.5);
        b.insert(8u8, 0.5 + 1e-15);

        assert!(are_maps_close(&a, &b));

        b.insert(8u8, 0.4);
        assert!(!are_maps_close(&a, &b));
    }

    #[test]
    fn test_sequences_similar_order_independent() {
        assert!(are_sequences_similar(&[1, 2, 3], &[3, 1, 2]));
        assert!(!are_sequences_similar(&[1, 2], &[1, 2, 2]));
    }

    #[test]
    fn test_sequences_similar_multiset() {
        // 多重集合语义：重复元素必须逐一配对
        assert!(are_sequences_similar(&[1, 1, 2], &[2, 1, 1]));
        assert!(!are_sequences_similar(&[1, 1, 2], &[1, 2, 2]));
    }
}
