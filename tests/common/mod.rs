#[allow(unused_imports)]
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_test_school(pool: &PgPool) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO schools (name, address) VALUES ($1, $2) RETURNING id",
    )
    .bind(format!("School {}", Uuid::new_v4()))
    .bind("1 Test Road")
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_class(pool: &PgPool, school_id: Uuid, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO classes (school_id, name) VALUES ($1, $2) RETURNING id",
    )
    .bind(school_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_subject(pool: &PgPool, school_id: Uuid, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO subjects (school_id, name) VALUES ($1, $2) RETURNING id",
    )
    .bind(school_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_student(
    pool: &PgPool,
    school_id: Uuid,
    class_id: Uuid,
    first_name: &str,
    last_name: &str,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO students (school_id, class_id, first_name, last_name)
           VALUES ($1, $2, $3, $4) RETURNING id"#,
    )
    .bind(school_id)
    .bind(class_id)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Seed a standard A-F scale and mark it active for the school.
#[allow(dead_code)]
pub async fn create_active_test_scale(pool: &PgPool, school_id: Uuid) -> Uuid {
    let scale_id = sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO grade_scales (school_id, name, is_active)
           VALUES ($1, 'Standard', TRUE) RETURNING id"#,
    )
    .bind(school_id)
    .fetch_one(pool)
    .await
    .unwrap();

    for (min, max, letter, point, remark) in [
        (70.0, 100.0, "A", 4.0, "Excellent"),
        (60.0, 69.99, "B", 3.0, "Good"),
        (50.0, 59.99, "C", 2.0, "Fair"),
        (40.0, 49.99, "D", 1.0, "Pass"),
        (0.0, 39.99, "F", 0.0, "Fail"),
    ] {
        sqlx::query(
            r#"INSERT INTO grade_scale_entries
               (grade_scale_id, min_percentage, max_percentage, grade_letter, grade_point, remark)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(scale_id)
        .bind(min)
        .bind(max)
        .bind(letter)
        .bind(point)
        .bind(remark)
        .execute(pool)
        .await
        .unwrap();
    }

    scale_id
}

#[allow(dead_code)]
pub async fn create_test_assessment(
    pool: &PgPool,
    school_id: Uuid,
    class_id: Uuid,
    subject_id: Uuid,
    name: &str,
    academic_year: &str,
    term: i32,
    max_marks: f64,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO assessments (school_id, class_id, subject_id, name, academic_year, term, max_marks)
           VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id"#,
    )
    .bind(school_id)
    .bind(class_id)
    .bind(subject_id)
    .bind(name)
    .bind(academic_year)
    .bind(term)
    .bind(max_marks)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn record_test_mark(
    pool: &PgPool,
    assessment_id: Uuid,
    student_id: Uuid,
    marks_obtained: Option<f64>,
) {
    sqlx::query(
        r#"INSERT INTO student_marks (assessment_id, student_id, marks_obtained)
           VALUES ($1, $2, $3)"#,
    )
    .bind(assessment_id)
    .bind(student_id)
    .bind(marks_obtained)
    .execute(pool)
    .await
    .unwrap();
}
