use std::collections::BTreeMap;

use nanoframe::error::Result;
use nanoframe::{filter, GroupIndex, GroupRange, GroupingConfig, Symbol};

fn collect_groups(index: &GroupIndex<u32>) -> Vec<(u32, Vec<u32>)> {
    let mut groups = Vec::new();
    index.for_each_group(|group| groups.push((group.representative, group.rows(index).to_vec())));
    groups
}

#[test]
fn test_groups_in_ascending_key_order() -> Result<()> {
    let values = vec![3, 1, 3, 2, 1];
    let index = GroupIndex::<u32>::build(values.len(), |row| values[row])?;

    let groups = collect_groups(&index);
    assert_eq!(
        groups,
        vec![(1, vec![1, 4]), (3, vec![3]), (0, vec![0, 2])]
    );
    assert_eq!(index.group_count(), 3);
    assert_eq!(index.group_sizes(), vec![2, 1, 2]);

    Ok(())
}

#[test]
fn test_every_row_in_exactly_one_group() -> Result<()> {
    let keys: Vec<u64> = (0..500u64).map(|i| (i * 31 + 7) % 13).collect();
    let index = GroupIndex::<u32>::build(keys.len(), |row| keys[row])?;

    let mut seen = vec![0usize; keys.len()];
    let mut previous_key = None;
    for group in index.groups() {
        let key = keys[group.representative as usize];
        if let Some(prev) = previous_key {
            assert!(prev < key);
        }
        previous_key = Some(key);

        group.for_each_row(&index, |row| {
            assert_eq!(keys[row], key);
            seen[row] += 1;
        });
    }

    assert!(seen.iter().all(|&count| count == 1));
    assert_eq!(index.group_count(), 13);
    Ok(())
}

#[test]
fn test_stable_within_group() -> Result<()> {
    let keys = vec!["b", "a", "b", "a", "b", "a"];
    let index = GroupIndex::<u32>::build(keys.len(), |row| keys[row])?;

    assert_eq!(index.permutation(), &[1, 3, 5, 0, 2, 4]);
    for group in index.groups() {
        let rows = group.rows(&index);
        assert!(rows.windows(2).all(|pair| pair[0] < pair[1]));
        // the representative is the first member in original row order
        assert_eq!(group.representative, rows[0]);
    }

    Ok(())
}

#[test]
fn test_group_start_marks_membership() -> Result<()> {
    let keys = vec![2, 2, 1, 3, 1];
    let index = GroupIndex::<u32>::build(keys.len(), |row| keys[row])?;

    let starts = index.group_starts();
    let perm = index.permutation();
    for i in 0..keys.len() {
        for j in 0..keys.len() {
            let same_key = keys[perm[i] as usize] == keys[perm[j] as usize];
            assert_eq!(starts[i] == starts[j], same_key);
        }
    }

    Ok(())
}

#[test]
fn test_representatives_one_per_key() -> Result<()> {
    let keys = vec![30, 10, 30, 20, 10, 20, 20];
    let index = GroupIndex::<u32>::build(keys.len(), |row| keys[row])?;

    let reps = index.representatives();
    assert_eq!(reps, vec![1, 3, 0]);

    let rep_keys = filter(&keys, &reps)?;
    assert_eq!(rep_keys, vec![10, 20, 30]);
    assert!(rep_keys.windows(2).all(|pair| pair[0] < pair[1]));

    Ok(())
}

#[test]
fn test_multi_column_keys() -> Result<()> {
    struct Region;

    let region: Vec<Symbol<Region>> = ["east", "west", "east", "west", "east"]
        .iter()
        .map(|s| Symbol::new(s))
        .collect::<Result<_>>()?;
    let year = vec![2024, 2024, 2023, 2024, 2024];
    let sales = vec![10.0, 20.0, 5.0, 1.0, 2.0];

    let index = GroupIndex::<u32>::build(region.len(), |row| (region[row], year[row]))?;
    assert_eq!(index.group_count(), 3);

    // grouped aggregation is driven by the caller
    let mut totals = BTreeMap::new();
    index.for_each_group(|group| {
        let total: f64 = group.rows(&index).iter().map(|&row| sales[row as usize]).sum();
        let rep = group.representative as usize;
        totals.insert((region[rep].to_string(), year[rep]), total);
    });

    assert_eq!(totals[&("east".to_string(), 2023)], 5.0);
    assert_eq!(totals[&("east".to_string(), 2024)], 12.0);
    assert_eq!(totals[&("west".to_string(), 2024)], 21.0);

    Ok(())
}

#[test]
fn test_single_row_and_all_equal() -> Result<()> {
    let one = GroupIndex::<u32>::build(1, |_| 42)?;
    assert_eq!(
        one.groups().collect::<Vec<_>>(),
        vec![GroupRange {
            representative: 0,
            begin: 0,
            end: 1
        }]
    );

    let same = GroupIndex::<u32>::build(4, |_| "k")?;
    assert_eq!(same.group_count(), 1);
    assert_eq!(same.representatives(), vec![0]);
    assert_eq!(same.permutation(), &[0, 1, 2, 3]);

    Ok(())
}

#[test]
fn test_inverted_range_is_empty() -> Result<()> {
    let index = GroupIndex::<u32>::build(6, |row| row % 2)?;
    let inverted = GroupRange {
        representative: 0u32,
        begin: 5,
        end: 1,
    };

    assert_eq!(inverted.len(), 0);
    assert!(inverted.is_empty());
    assert!(inverted.rows(&index).is_empty());
    Ok(())
}

#[test]
fn test_for_each_group_chains() -> Result<()> {
    let keys = vec![1, 0, 1];
    let index = GroupIndex::<u32>::build(keys.len(), |row| keys[row])?;

    let mut sizes = Vec::new();
    let mut heads = Vec::new();
    index
        .for_each_group(|group| sizes.push(group.len()))
        .for_each_group(|group| heads.push(group.representative));

    assert_eq!(sizes, vec![1, 2]);
    assert_eq!(heads, vec![1, 0]);
    Ok(())
}

#[test]
fn test_repeated_builds_are_identical() -> Result<()> {
    let keys: Vec<i32> = (0..2_000).map(|i| (i * 17) % 23 - 11).collect();
    let config = GroupingConfig::new().with_min_parallel_rows(100);

    let first = GroupIndex::<u32>::build(keys.len(), |row| keys[row])?;
    let second = GroupIndex::<u32>::build(keys.len(), |row| keys[row])?;
    let parallel = GroupIndex::<u32>::build_with_config(keys.len(), |row| keys[row], &config)?;

    assert_eq!(first, second);
    assert_eq!(first, parallel);
    Ok(())
}
