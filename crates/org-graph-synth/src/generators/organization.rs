//! L04: departments (with large-department subdivision) and organizational
//! units.

use org_graph_core::types::kinds::{Department, OrganizationalUnit};
use org_graph_core::types::{Entity, EntityKind};

use crate::context::GenerationContext;
use crate::templates::{sub_departments_for, FUNCTIONAL_DOMAINS, OU_TYPES};

/// Headcount above which a department is split into sub-departments.
pub const SUBDIVISION_THRESHOLD: u32 = 500;
/// Share of headcount the parent keeps for leadership after subdivision.
const LEADERSHIP_FRACTION: f64 = 0.03;

pub fn generate_departments(ctx: &mut GenerationContext) -> Vec<Entity> {
    let specs = ctx.profile.department_specs.clone();
    let org_name = ctx.profile.name.clone();
    let employee_count = ctx.profile.employee_count;
    let mut departments = Vec::new();

    for spec in specs {
        let headcount = (employee_count as f64 * spec.headcount_fraction) as u32;
        let budget = headcount as f64 * ctx.rng_float(80_000.0, 150_000.0);
        let code: String = spec
            .name
            .to_uppercase()
            .replace(' ', "_")
            .chars()
            .take(8)
            .collect();

        let parent = ctx
            .entity(
                spec.name.clone(),
                EntityKind::Department(Department {
                    code: code.clone(),
                    headcount,
                    budget: Some((budget * 100.0).round() / 100.0),
                    data_sensitivity: spec.data_sensitivity.clone(),
                    parent_department_id: None,
                    head_id: None,
                    location_id: None,
                }),
            )
            .with_description(format!("{} department at {org_name}", spec.name))
            .with_tags([spec.data_sensitivity.as_str()]);

        match sub_departments_for(&spec.name) {
            Some(templates) if headcount > SUBDIVISION_THRESHOLD => {
                departments.extend(subdivide(parent, templates, &org_name, ctx));
            }
            _ => departments.push(parent),
        }
    }
    departments
}

/// Split a large department: the parent keeps a small leadership headcount,
/// the remainder is spread evenly across `min(templates, max(2, hc/300))`
/// sub-departments linked via `parent_department_id`.
fn subdivide(
    mut parent: Entity,
    templates: &[&str],
    org_name: &str,
    ctx: &mut GenerationContext,
) -> Vec<Entity> {
    let EntityKind::Department(parent_dept) = &mut parent.kind else {
        return vec![parent];
    };
    let headcount = parent_dept.headcount;
    let sub_count = (templates.len() as u32).min(2.max(headcount / 300)) as usize;
    let leadership = 3.max((headcount as f64 * LEADERSHIP_FRACTION) as u32);
    let remaining = headcount.saturating_sub(leadership);
    parent_dept.headcount = leadership;

    let parent_id = parent.id.clone();
    let parent_name = parent.name.clone();
    let parent_code = parent_dept.code.clone();
    let sensitivity = parent_dept.data_sensitivity.clone();

    let base = remaining / sub_count as u32;
    let leftover = remaining - base * sub_count as u32;

    let mut result = vec![parent];
    for (i, sub_name) in templates.iter().take(sub_count).enumerate() {
        let sub_headcount = base + u32::from((i as u32) < leftover);
        let budget = sub_headcount as f64 * ctx.rng_float(80_000.0, 150_000.0);
        let entity = ctx
            .entity(
                format!("{parent_name} - {sub_name}"),
                EntityKind::Department(Department {
                    code: format!("{parent_code}_{:02}", i + 1).chars().take(8).collect(),
                    headcount: sub_headcount,
                    budget: Some((budget * 100.0).round() / 100.0),
                    data_sensitivity: sensitivity.clone(),
                    parent_department_id: Some(parent_id.clone()),
                    head_id: None,
                    location_id: None,
                }),
            )
            .with_description(format!(
                "{sub_name} division within {parent_name} at {org_name}"
            ))
            .with_tags([sensitivity.as_str()]);
        result.push(entity);
    }
    result
}

pub fn generate_org_units(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let mut units = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let unit_type = *ctx.choose(OU_TYPES);
        let domain = *ctx.choose(FUNCTIONAL_DOMAINS);
        let scope = *ctx.choose(&["Global", "Regional", "National", "Local"]);
        let status = *ctx.choose(&["Active", "Planned", "Under Restructuring"]);
        let entity = ctx
            .entity(
                format!("{domain} {unit_type}"),
                EntityKind::OrganizationalUnit(OrganizationalUnit {
                    unit_type: unit_type.to_string(),
                    operational_status: status.to_string(),
                    geographic_scope: scope.to_string(),
                    functional_domain: domain.to_string(),
                }),
            )
            .with_description(format!(
                "{scope} {} for the {} function",
                unit_type.to_lowercase(),
                domain.to_lowercase()
            ))
            .with_tags([unit_type.to_lowercase().replace(' ', "-")]);
        units.push(entity);
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::tech_company;

    fn departments_of(employees: u32) -> Vec<Entity> {
        let mut ctx = GenerationContext::new(tech_company("Acme", employees), 42);
        generate_departments(&mut ctx)
    }

    #[test]
    fn small_org_keeps_flat_departments() {
        let departments = departments_of(100);
        assert_eq!(departments.len(), 10);
        for d in &departments {
            let EntityKind::Department(dept) = &d.kind else {
                panic!("wrong kind");
            };
            assert!(dept.parent_department_id.is_none());
        }
    }

    #[test]
    fn engineering_subdivides_at_fourteen_thousand_employees() {
        let departments = departments_of(14_000);
        let root = departments
            .iter()
            .find(|d| d.name == "Engineering")
            .expect("engineering root");
        let EntityKind::Department(root_dept) = &root.kind else {
            panic!("wrong kind");
        };
        assert!(root_dept.parent_department_id.is_none());
        // 14000 * 0.35 = 4900 headcount → ten sub-departments.
        let subs: Vec<&Entity> = departments
            .iter()
            .filter(|d| match &d.kind {
                EntityKind::Department(dept) => {
                    dept.parent_department_id.as_deref() == Some(root.id.as_str())
                }
                _ => false,
            })
            .collect();
        assert!(subs.len() >= 5, "only {} sub-departments", subs.len());

        // Headcount is conserved across the split.
        let total: u32 = std::iter::once(root)
            .chain(subs.iter().copied())
            .map(|d| match &d.kind {
                EntityKind::Department(dept) => dept.headcount,
                _ => 0,
            })
            .sum();
        assert_eq!(total, 4900);
    }

    #[test]
    fn subdivision_is_even_with_remainder_spread() {
        let departments = departments_of(14_000);
        let mut sub_headcounts: Vec<u32> = departments
            .iter()
            .filter_map(|d| match &d.kind {
                EntityKind::Department(dept) if dept.parent_department_id.is_some() => {
                    Some(dept.headcount)
                }
                _ => None,
            })
            .collect();
        sub_headcounts.sort_unstable();
        if let (Some(min), Some(max)) = (sub_headcounts.first(), sub_headcounts.last()) {
            assert!(max - min <= 1, "uneven split: {min}..{max}");
        }
    }
}
