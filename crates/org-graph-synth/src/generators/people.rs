//! L05: persons and roles.
//!
//! Above [`PERSON_CEILING`] employees the generator materialises a
//! representative sample of people rather than one entity per employee;
//! department `headcount` fields carry the true numbers. Role seniority
//! expansion keys off leaf-department headcount with `>=` thresholds.

use org_graph_core::types::kinds::{Person, Role};
use org_graph_core::types::{Entity, EntityKind, EntityType};

use crate::context::GenerationContext;
use crate::templates::{
    permissions_for, roles_for, CLEARANCE_LEVELS, FIRST_NAMES, LAST_NAMES,
    SENIORITY_EXEMPT_MARKERS,
};

/// Cap on generated person entities. Keeps the resident graph bounded at
/// very large employee counts while headcount fields stay exact.
pub const PERSON_CEILING: u32 = 3000;

pub fn person_count(employee_count: u32) -> u32 {
    employee_count.min(PERSON_CEILING)
}

pub fn generate_people(count: u32, ctx: &mut GenerationContext) -> Vec<Entity> {
    let domain = ctx.profile.email_domain();
    let contractor_fraction = ctx.profile.contractor_fraction;
    let mut people = Vec::with_capacity(count as usize);
    for i in 0..count {
        let first = *ctx.choose(FIRST_NAMES);
        let last = *ctx.choose(LAST_NAMES);
        let is_contractor = (i as f64 / count.max(1) as f64) > (1.0 - contractor_fraction);
        let clearance = *ctx.choose(CLEARANCE_LEVELS);
        let is_active = ctx.chance(0.95);
        let hire_date = ctx.date_between(2014, 2025);
        let email = format!(
            "{}.{}{}@{domain}",
            first.to_lowercase(),
            last.to_lowercase(),
            i
        );
        let entity = ctx
            .entity(
                format!("{first} {last}"),
                EntityKind::Person(Person {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email,
                    title: String::new(),
                    employee_id: format!("EMP-{:06}", i + 1),
                    clearance_level: clearance.to_string(),
                    is_active,
                    hire_date: Some(hire_date),
                    department_id: None,
                    holds_roles: Vec::new(),
                    located_at: None,
                }),
            )
            .with_tags([if is_contractor { "contractor" } else { "employee" }]);
        people.push(entity);
    }
    people
}

/// True when the title carries a management or pre-levelled marker and is
/// therefore exempt from seniority expansion.
fn seniority_exempt(role_name: &str) -> bool {
    let lower = role_name.to_lowercase();
    SENIORITY_EXEMPT_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Seniority variants for a role in a department of the given headcount.
/// Thresholds are inclusive: exactly 500 earns the Staff variant.
fn seniority_variants(role_name: &str, headcount: u32) -> Vec<String> {
    if seniority_exempt(role_name) {
        return vec![role_name.to_string()];
    }
    let mut variants = vec![role_name.to_string()];
    if headcount >= 100 {
        variants.push(format!("Senior {role_name}"));
    }
    if headcount >= 300 {
        variants.insert(0, format!("Junior {role_name}"));
    }
    if headcount >= 500 {
        variants.push(format!("Staff {role_name}"));
    }
    variants
}

/// Sub-department names look like `"Engineering - Platform Engineering"`;
/// role templates key off the parent.
fn parent_department_name(name: &str) -> &str {
    name.split(" - ").next().unwrap_or(name)
}

pub fn generate_roles(ctx: &mut GenerationContext) -> Vec<Entity> {
    let departments: Vec<(String, String, u32, bool)> = {
        let pool = ctx.entities(EntityType::Department);
        let parent_ids: std::collections::HashSet<String> = pool
            .iter()
            .filter_map(|d| match &d.kind {
                EntityKind::Department(dept) => dept.parent_department_id.clone(),
                _ => None,
            })
            .collect();
        pool.iter()
            .map(|d| {
                let headcount = match &d.kind {
                    EntityKind::Department(dept) => dept.headcount,
                    _ => 0,
                };
                (
                    d.id.clone(),
                    d.name.clone(),
                    headcount,
                    parent_ids.contains(&d.id),
                )
            })
            .collect()
    };

    let mut roles = Vec::new();
    for (dept_id, dept_name, headcount, has_children) in departments {
        // Roles attach to leaf departments only.
        if has_children {
            continue;
        }
        let parent = parent_department_name(&dept_name).to_string();
        let templates = roles_for(&parent);
        for role_name in templates {
            for variant in seniority_variants(role_name, headcount) {
                let lower = variant.to_lowercase();
                let is_privileged = [
                    "admin", "lead", "manager", "director", "ciso", "cto", "ceo", "cfo", "coo",
                    "staff", "senior",
                ]
                .iter()
                .any(|marker| lower.contains(marker));
                let access_level = if is_privileged {
                    "privileged"
                } else {
                    *ctx.choose(&["standard", "elevated"])
                };
                // Variant permissions fall back to the base role's set.
                let permissions = permissions_for(&variant);
                let permissions = if permissions == crate::templates::DEFAULT_PERMISSIONS {
                    permissions_for(role_name)
                } else {
                    permissions
                };
                let entity = ctx
                    .entity(
                        variant.clone(),
                        EntityKind::Role(Role {
                            department_id: Some(dept_id.clone()),
                            access_level: access_level.to_string(),
                            is_privileged,
                            permissions: permissions.iter().map(|p| p.to_string()).collect(),
                            filled_by_persons: Vec::new(),
                            headcount_filled: 0,
                        }),
                    )
                    .with_description(format!("{variant} role in {dept_name}"))
                    .with_tags([dept_name.to_lowercase().replace(' ', "_")]);
                roles.push(entity);
            }
        }
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::organization::generate_departments;
    use crate::profiles::tech_company;

    #[test]
    fn person_count_is_capped() {
        assert_eq!(person_count(100), 100);
        assert_eq!(person_count(20_000), PERSON_CEILING);
    }

    #[test]
    fn emails_are_unique_and_domain_scoped() {
        let mut ctx = GenerationContext::new(tech_company("Acme Co", 100), 42);
        let people = generate_people(50, &mut ctx);
        let mut emails: Vec<String> = people
            .iter()
            .map(|p| match &p.kind {
                EntityKind::Person(person) => person.email.clone(),
                _ => panic!("wrong kind"),
            })
            .collect();
        assert!(emails.iter().all(|e| e.ends_with("@acmeco.com")));
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), 50);
    }

    #[test]
    fn seniority_thresholds_are_inclusive() {
        assert_eq!(seniority_variants("Software Engineer", 99).len(), 1);
        assert_eq!(seniority_variants("Software Engineer", 100).len(), 2);
        let at_300 = seniority_variants("Software Engineer", 300);
        assert_eq!(at_300.len(), 3);
        assert!(at_300[0].starts_with("Junior"));
        let at_500 = seniority_variants("Software Engineer", 500);
        assert_eq!(at_500.len(), 4);
        assert!(at_500.last().unwrap().starts_with("Staff"));
    }

    #[test]
    fn management_titles_are_exempt_from_expansion() {
        for title in ["Sales Manager", "CISO", "Tech Lead", "Compliance Officer"] {
            assert_eq!(seniority_variants(title, 10_000).len(), 1, "{title}");
        }
    }

    #[test]
    fn roles_attach_to_leaf_departments_with_senior_variants_at_scale() {
        let mut ctx = GenerationContext::new(tech_company("Acme", 14_000), 42);
        let departments = generate_departments(&mut ctx);
        ctx.store(EntityType::Department, departments);
        let roles = generate_roles(&mut ctx);

        // Every engineering sub-department has at least one Senior or Staff
        // role attached.
        let dept_pool: Vec<Entity> = ctx.entities(EntityType::Department).to_vec();
        for dept in dept_pool.iter().filter(|d| d.name.starts_with("Engineering - ")) {
            let has_senior = roles.iter().any(|r| match &r.kind {
                EntityKind::Role(role) => {
                    role.department_id.as_deref() == Some(dept.id.as_str())
                        && (r.name.starts_with("Senior") || r.name.starts_with("Staff"))
                }
                _ => false,
            });
            assert!(has_senior, "no senior role in {}", dept.name);
        }

        // No role attaches to a subdivided parent.
        let engineering_root = dept_pool
            .iter()
            .find(|d| d.name == "Engineering")
            .expect("root");
        assert!(roles.iter().all(|r| match &r.kind {
            EntityKind::Role(role) =>
                role.department_id.as_deref() != Some(engineering_root.id.as_str()),
            _ => true,
        }));
    }
}
