use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user_dto::{
    CreateCertificationPayload, CreateEducationPayload, CreatePortfolioPayload,
    UpdateClientProfilePayload, UpdateVendorProfilePayload,
};
use crate::error::{Error, Result};
use crate::models::profile::{
    Certification, ClientProfile, Education, Portfolio, Skill, VendorProfile,
};
use crate::models::review::Review;
use crate::models::user::User;

const CLIENT_PROFILE_COLUMNS: &str = "id, user_id, company_name, contact_number, address";
const VENDOR_PROFILE_COLUMNS: &str = "id, user_id, hourly_rate";
const REVIEW_COLUMNS: &str =
    "id, project_id, reviewer_id, reviewee_id, rating, comment, created_at";

#[derive(Clone)]
pub struct ProfileService {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
pub struct VendorSummary {
    pub id: Uuid,
    pub username: String,
    pub location: String,
    pub hourly_rate: Option<Decimal>,
    pub average_rating: Option<f64>,
}

pub struct VendorDetail {
    pub user: User,
    pub profile: VendorProfile,
    pub skills: Vec<Skill>,
    pub portfolios: Vec<Portfolio>,
    pub certifications: Vec<Certification>,
    pub education: Vec<Education>,
    pub reviews: Vec<Review>,
    pub average_rating: Option<f64>,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_client_profile(&self, user_id: Uuid) -> Result<ClientProfile> {
        let query =
            format!("SELECT {CLIENT_PROFILE_COLUMNS} FROM client_profiles WHERE user_id = $1");
        sqlx::query_as::<_, ClientProfile>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Client profile not found".to_string()))
    }

    pub async fn update_client_profile(
        &self,
        user_id: Uuid,
        payload: UpdateClientProfilePayload,
    ) -> Result<ClientProfile> {
        let update = format!(
            "UPDATE client_profiles SET \
                company_name = COALESCE($2, company_name), \
                contact_number = COALESCE($3, contact_number), \
                address = COALESCE($4, address) \
             WHERE user_id = $1 RETURNING {CLIENT_PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, ClientProfile>(&update)
            .bind(user_id)
            .bind(payload.company_name)
            .bind(payload.contact_number)
            .bind(payload.address)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Client profile not found".to_string()))
    }

    pub async fn list_vendors(&self) -> Result<Vec<VendorSummary>> {
        let vendors = sqlx::query_as::<_, VendorSummary>(
            "SELECT u.id, u.username, u.location, vp.hourly_rate, \
                    AVG(r.rating)::float8 AS average_rating \
             FROM vendor_profiles vp \
             JOIN users u ON u.id = vp.user_id \
             LEFT JOIN reviews r ON r.reviewee_id = u.id \
             GROUP BY u.id, u.username, u.location, vp.hourly_rate \
             ORDER BY u.username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(vendors)
    }

    pub async fn get_vendor_detail(&self, user_id: Uuid) -> Result<VendorDetail> {
        let profile = self.vendor_profile(user_id).await?;

        let user_query = "SELECT id, username, email, password_hash, bio, location, language, \
                          profile_picture, capabilities, created_at, updated_at \
                          FROM users WHERE id = $1";
        let user = sqlx::query_as::<_, User>(user_query)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let skills = sqlx::query_as::<_, Skill>(
            "SELECT s.id, s.name FROM skills s \
             JOIN vendor_skills vs ON vs.skill_id = s.id \
             WHERE vs.vendor_id = $1 ORDER BY s.name",
        )
        .bind(profile.id)
        .fetch_all(&self.pool)
        .await?;

        let portfolios = sqlx::query_as::<_, Portfolio>(
            "SELECT id, vendor_id, title, description, url, created_at \
             FROM portfolios WHERE vendor_id = $1 ORDER BY created_at DESC",
        )
        .bind(profile.id)
        .fetch_all(&self.pool)
        .await?;

        let certifications = sqlx::query_as::<_, Certification>(
            "SELECT id, vendor_id, name, authority, year \
             FROM certifications WHERE vendor_id = $1 ORDER BY year DESC NULLS LAST",
        )
        .bind(profile.id)
        .fetch_all(&self.pool)
        .await?;

        let education = sqlx::query_as::<_, Education>(
            "SELECT id, vendor_id, institution, degree, graduation_year \
             FROM education WHERE vendor_id = $1 ORDER BY graduation_year DESC NULLS LAST",
        )
        .bind(profile.id)
        .fetch_all(&self.pool)
        .await?;

        let reviews_query = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE reviewee_id = $1 \
             ORDER BY created_at DESC"
        );
        let reviews = sqlx::query_as::<_, Review>(&reviews_query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let average_rating = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(rating)::float8 FROM reviews WHERE reviewee_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(VendorDetail {
            user,
            profile,
            skills,
            portfolios,
            certifications,
            education,
            reviews,
            average_rating,
        })
    }

    pub async fn update_vendor_profile(
        &self,
        user_id: Uuid,
        payload: UpdateVendorProfilePayload,
    ) -> Result<VendorProfile> {
        if let Some(rate) = payload.hourly_rate {
            if rate < Decimal::ZERO {
                return Err(Error::Validation(
                    "hourly_rate must not be negative".to_string(),
                ));
            }
        }

        let mut tx = self.pool.begin().await?;

        let update = format!(
            "UPDATE vendor_profiles SET hourly_rate = COALESCE($2, hourly_rate) \
             WHERE user_id = $1 RETURNING {VENDOR_PROFILE_COLUMNS}"
        );
        let profile = sqlx::query_as::<_, VendorProfile>(&update)
            .bind(user_id)
            .bind(payload.hourly_rate)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::NotFound("Vendor profile not found".to_string()))?;

        if let Some(skill_ids) = payload.skill_ids {
            let known = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM skills WHERE id = ANY($1)",
            )
            .bind(&skill_ids)
            .fetch_one(&mut *tx)
            .await?;
            if known != skill_ids.len() as i64 {
                return Err(Error::Validation(
                    "One or more skill ids are unknown".to_string(),
                ));
            }

            sqlx::query("DELETE FROM vendor_skills WHERE vendor_id = $1")
                .bind(profile.id)
                .execute(&mut *tx)
                .await?;
            for skill_id in skill_ids {
                sqlx::query(
                    "INSERT INTO vendor_skills (vendor_id, skill_id) VALUES ($1, $2) \
                     ON CONFLICT DO NOTHING",
                )
                .bind(profile.id)
                .bind(skill_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(profile)
    }

    pub async fn add_portfolio(
        &self,
        user_id: Uuid,
        payload: CreatePortfolioPayload,
    ) -> Result<Portfolio> {
        let profile = self.vendor_profile(user_id).await?;
        let portfolio = sqlx::query_as::<_, Portfolio>(
            "INSERT INTO portfolios (vendor_id, title, description, url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, vendor_id, title, description, url, created_at",
        )
        .bind(profile.id)
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.url)
        .fetch_one(&self.pool)
        .await?;
        Ok(portfolio)
    }

    pub async fn delete_portfolio(&self, user_id: Uuid, portfolio_id: Uuid) -> Result<()> {
        let profile = self.vendor_profile(user_id).await?;
        let result = sqlx::query("DELETE FROM portfolios WHERE id = $1 AND vendor_id = $2")
            .bind(portfolio_id)
            .bind(profile.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Portfolio not found".to_string()));
        }
        Ok(())
    }

    pub async fn add_certification(
        &self,
        user_id: Uuid,
        payload: CreateCertificationPayload,
    ) -> Result<Certification> {
        let profile = self.vendor_profile(user_id).await?;
        let certification = sqlx::query_as::<_, Certification>(
            "INSERT INTO certifications (vendor_id, name, authority, year) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, vendor_id, name, authority, year",
        )
        .bind(profile.id)
        .bind(payload.name)
        .bind(payload.authority)
        .bind(payload.year)
        .fetch_one(&self.pool)
        .await?;
        Ok(certification)
    }

    pub async fn delete_certification(
        &self,
        user_id: Uuid,
        certification_id: Uuid,
    ) -> Result<()> {
        let profile = self.vendor_profile(user_id).await?;
        let result = sqlx::query("DELETE FROM certifications WHERE id = $1 AND vendor_id = $2")
            .bind(certification_id)
            .bind(profile.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Certification not found".to_string()));
        }
        Ok(())
    }

    pub async fn add_education(
        &self,
        user_id: Uuid,
        payload: CreateEducationPayload,
    ) -> Result<Education> {
        let profile = self.vendor_profile(user_id).await?;
        let education = sqlx::query_as::<_, Education>(
            "INSERT INTO education (vendor_id, institution, degree, graduation_year) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, vendor_id, institution, degree, graduation_year",
        )
        .bind(profile.id)
        .bind(payload.institution)
        .bind(payload.degree)
        .bind(payload.graduation_year)
        .fetch_one(&self.pool)
        .await?;
        Ok(education)
    }

    pub async fn delete_education(&self, user_id: Uuid, education_id: Uuid) -> Result<()> {
        let profile = self.vendor_profile(user_id).await?;
        let result = sqlx::query("DELETE FROM education WHERE id = $1 AND vendor_id = $2")
            .bind(education_id)
            .bind(profile.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Education entry not found".to_string()));
        }
        Ok(())
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>> {
        let skills = sqlx::query_as::<_, Skill>("SELECT id, name FROM skills ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(skills)
    }

    async fn vendor_profile(&self, user_id: Uuid) -> Result<VendorProfile> {
        let query =
            format!("SELECT {VENDOR_PROFILE_COLUMNS} FROM vendor_profiles WHERE user_id = $1");
        sqlx::query_as::<_, VendorProfile>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Vendor profile not found".to_string()))
    }
}
