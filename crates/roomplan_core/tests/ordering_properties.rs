use proptest::prelude::*;
use roomplan_core::{compare_people, sort_people, Gender, Person, Seniority, Title};
use std::cmp::Ordering;

const TITLES: &[&str] = &["교수", "부교수", "임상강사", "연구교수"];
const DATES: &[&str] = &["", "2010-01-01", "2015-06-30"];

fn person_strategy() -> impl Strategy<Value = (usize, Option<i64>, usize, usize)> {
    (
        0..TITLES.len(),
        proptest::option::of(0i64..3),
        0..DATES.len(),
        0..DATES.len(),
    )
}

fn build(index: usize, fields: (usize, Option<i64>, usize, usize)) -> Person {
    let (title, seniority, promotion, birth) = fields;
    let mut person = Person::new(
        format!("p{index}"),
        format!("name{index}"),
        Title::parse(TITLES[title]),
        Gender::Female,
    );
    person.seniority = seniority.map_or(Seniority::UNPARSED, Seniority::new);
    person.promotion_date = DATES[promotion].to_string();
    person.birth_date = DATES[birth].to_string();
    person
}

proptest! {
    #[test]
    fn sort_is_ordered_and_stable(fields in proptest::collection::vec(person_strategy(), 0..40)) {
        let people: Vec<Person> = fields
            .into_iter()
            .enumerate()
            .map(|(index, fields)| build(index, fields))
            .collect();
        let mut sorted: Vec<&Person> = people.iter().collect();
        sort_people(&mut sorted);

        let position = |person: &Person| {
            people
                .iter()
                .position(|candidate| candidate.id == person.id)
                .expect("sorted person comes from input")
        };

        for pair in sorted.windows(2) {
            match compare_people(pair[0], pair[1]) {
                Ordering::Less => {}
                Ordering::Equal => prop_assert!(position(pair[0]) < position(pair[1])),
                Ordering::Greater => prop_assert!(false, "output is not ordered"),
            }
        }
    }

    #[test]
    fn comparator_is_antisymmetric(a in person_strategy(), b in person_strategy()) {
        let left = build(0, a);
        let right = build(1, b);
        prop_assert_eq!(compare_people(&left, &right), compare_people(&right, &left).reverse());
    }
}
